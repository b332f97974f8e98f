//! Errors raised while splitting a document.

/// A parse failure. The partially split document is discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No registered handler claimed the line. Only possible with a
    /// dispatcher that lacks the unconditional content handler.
    #[error("no handler registered for line {line}")]
    NoHandlerFound { line: usize },

    /// The document ended while a fenced block was still open.
    #[error("code block opened at line {opened_at}, language {language:?}, never closed")]
    UnterminatedCodeBlock {
        opened_at: usize,
        language: String,
        /// Body lines collected before the input ran out.
        partial: Vec<String>,
    },

    /// A heading marker run interrupted by other characters before the first space.
    #[error("malformed heading at line {line}: {text:?}")]
    MalformedHeading { line: usize, text: String },

    /// The configured markers cannot be used to split a document.
    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),
}

impl ParseError {
    /// The 1-based line the failure points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::NoHandlerFound { line } | Self::MalformedHeading { line, .. } => Some(*line),
            Self::UnterminatedCodeBlock { opened_at, .. } => Some(*opened_at),
            Self::InvalidSyntax(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unterminated_message_names_line_and_language() {
        let err = ParseError::UnterminatedCodeBlock {
            opened_at: 3,
            language: "rust".to_string(),
            partial: vec!["fn main() {}".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "code block opened at line 3, language \"rust\", never closed"
        );
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn malformed_heading_message() {
        let err = ParseError::MalformedHeading {
            line: 7,
            text: "#a# b".to_string(),
        };
        assert_eq!(err.to_string(), "malformed heading at line 7: \"#a# b\"");
    }
}
