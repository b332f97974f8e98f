//! Plain content accumulation.

/// Inline markup characters dropped from plain content.
pub const MARKUP_CHARS: [char; 3] = ['*', '`', '_'];

/// Remove inline emphasis and code markers, keeping everything else.
pub fn strip_markup(line: &str) -> String {
    line.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect()
}

/// Running buffer of content lines in document order.
#[derive(Debug, Default, Clone)]
pub struct ContentAccumulator {
    lines: Vec<String>,
}

impl ContentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line with markup stripped. Blank lines are kept as paragraph
    /// separators.
    pub fn push(&mut self, line: &str) {
        self.lines.push(strip_markup(line));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The accumulated content joined with `\n`.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
