//! Line sequence shared by the dispatcher and the extractors.
//!
//! A [`Document`] is materialised once from the source text. Parsing walks it
//! through a [`LineCursor`]; whoever holds the `&mut LineCursor` owns
//! advancement. The dispatcher hands the cursor to the code block extractor
//! while a fence is open and resumes only after it returns.

/// An immutable, line-split view of a source text.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Document<'a> {
    /// Split `source` into lines. `\n` and `\r\n` terminators are dropped.
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The raw lines in document order.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// A fresh cursor positioned before the first line.
    pub fn cursor(&self) -> LineCursor<'_, 'a> {
        LineCursor {
            lines: &self.lines,
            position: 0,
        }
    }
}

/// One line together with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Forward-only position in a [`Document`].
#[derive(Debug)]
pub struct LineCursor<'d, 'a> {
    lines: &'d [&'a str],
    position: usize,
}

impl<'a> LineCursor<'_, 'a> {
    /// Take the next line, advancing the cursor.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        let text = *self.lines.get(self.position)?;
        self.position += 1;
        Some(Line {
            number: self.position,
            text,
        })
    }

    /// Number of lines consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.lines.len()
    }
}
