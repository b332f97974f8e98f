//! Marker characters and parse options.

use serde::Deserialize;

use crate::error::ParseError;

/// Markers that drive line classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Syntax {
    /// Repeated at line start to mark a heading; the run length is the level.
    #[serde(default = "default_heading_marker")]
    pub heading_marker: char,

    /// Delimiter opening and closing a fenced code block.
    #[serde(default = "default_fence")]
    pub fence: String,
}

fn default_heading_marker() -> char {
    '#'
}

fn default_fence() -> String {
    "```".to_string()
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            heading_marker: default_heading_marker(),
            fence: default_fence(),
        }
    }
}

impl Syntax {
    /// Whether `line` starts with the heading marker.
    pub fn opens_heading(&self, line: &str) -> bool {
        line.starts_with(self.heading_marker)
    }

    /// Whether `line` starts with the fence marker.
    pub fn opens_fence(&self, line: &str) -> bool {
        !self.fence.is_empty() && line.starts_with(self.fence.as_str())
    }

    /// Whether `line` is exactly the fence marker.
    pub fn closes_fence(&self, line: &str) -> bool {
        line == self.fence
    }

    /// Reject marker combinations that make a channel unreachable.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.fence.is_empty() {
            return Err(ParseError::InvalidSyntax("fence marker is empty".to_string()));
        }
        if self.fence.contains('\n') {
            return Err(ParseError::InvalidSyntax(
                "fence marker spans lines".to_string(),
            ));
        }
        if self.fence.starts_with(self.heading_marker) {
            return Err(ParseError::InvalidSyntax(format!(
                "fence {:?} starts with the heading marker {:?}",
                self.fence, self.heading_marker
            )));
        }
        if self.heading_marker.is_whitespace() {
            return Err(ParseError::InvalidSyntax(
                "heading marker is whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Knobs accepted by every parse entry point.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParseOptions {
    #[serde(flatten)]
    pub syntax: Syntax,

    /// Reject marker runs interrupted before the first space (`#a#b title`).
    #[serde(default = "default_strict")]
    pub strict_headings: bool,
}

fn default_strict() -> bool {
    true
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            syntax: Syntax::default(),
            strict_headings: default_strict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_markers() {
        let syntax = Syntax::default();
        assert!(syntax.opens_heading("## Title"));
        assert!(!syntax.opens_heading(" # indented"));
        assert!(syntax.opens_fence("```rust"));
        assert!(syntax.closes_fence("```"));
        assert!(!syntax.closes_fence("```rust"));
        assert!(!syntax.closes_fence("``` "));
    }

    #[test]
    fn default_syntax_is_valid() {
        assert!(Syntax::default().validate().is_ok());
    }

    #[test]
    fn rejects_shadowed_fence() {
        let syntax = Syntax {
            heading_marker: '`',
            fence: "```".to_string(),
        };
        assert!(matches!(
            syntax.validate(),
            Err(ParseError::InvalidSyntax(_))
        ));

        let empty = Syntax {
            fence: String::new(),
            ..Syntax::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ParseOptions = serde_json::from_str(r#"{"heading_marker": "="}"#).unwrap();
        assert_eq!(options.syntax.heading_marker, '=');
        assert_eq!(options.syntax.fence, "```");
        assert!(options.strict_headings);
    }

    #[test]
    fn custom_markers() {
        let syntax = Syntax {
            heading_marker: '=',
            fence: "~~~".to_string(),
        };
        assert!(syntax.opens_heading("== Sub"));
        assert!(!syntax.opens_heading("# Sub"));
        assert!(syntax.opens_fence("~~~py"));
        assert!(!syntax.opens_fence("```py"));
    }
}
