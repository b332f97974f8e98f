//! Headline extraction.

use serde::Serialize;

use crate::error::ParseError;
use crate::lines::Line;
use crate::syntax::ParseOptions;

/// Inline code marker removed from heading titles.
const CODE_MARKER: char = '`';

/// A heading line reduced to its level and plain title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Number of leading marker characters, always at least 1.
    pub level: usize,
    pub text: String,
}

/// Turn a heading line into a [`Heading`].
///
/// The level is the length of the leading marker run. One separating space
/// is dropped and inline code markers are removed from the title; a run with
/// no following space is still a heading whose title is the remainder.
pub fn extract_heading(line: Line<'_>, options: &ParseOptions) -> Result<Heading, ParseError> {
    let marker = options.syntax.heading_marker;
    let level = line.text.chars().take_while(|c| *c == marker).count();

    if level == 0 {
        return Err(malformed(line));
    }

    let rest = &line.text[level * marker.len_utf8()..];

    if options.strict_headings {
        let head = rest.split(' ').next().unwrap_or("");
        if head.contains(marker) {
            return Err(malformed(line));
        }
    }

    let title = rest.strip_prefix(' ').unwrap_or(rest);

    Ok(Heading {
        level,
        text: title.chars().filter(|c| *c != CODE_MARKER).collect(),
    })
}

fn malformed(line: Line<'_>) -> ParseError {
    ParseError::MalformedHeading {
        line: line.number,
        text: line.text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(text: &str) -> Result<Heading, ParseError> {
        extract_heading(Line { number: 1, text }, &ParseOptions::default())
    }

    #[test]
    fn counts_marker_run_as_level() {
        assert_eq!(
            heading("### Install").unwrap(),
            Heading {
                level: 3,
                text: "Install".to_string()
            }
        );
    }

    #[test]
    fn strips_only_one_separating_space() {
        assert_eq!(heading("#   Indented").unwrap().text, "  Indented");
    }

    #[test]
    fn accepts_run_without_space() {
        let h = heading("##Compact").unwrap();
        assert_eq!(h.level, 2);
        assert_eq!(h.text, "Compact");
    }

    #[test]
    fn removes_inline_code_markers() {
        assert_eq!(heading("## The `parse` function").unwrap().text, "The parse function");
    }

    #[test]
    fn keeps_markers_after_the_first_space() {
        assert_eq!(heading("# Using C# today").unwrap().text, "Using C# today");
    }

    #[test]
    fn bare_marker_run_has_empty_title() {
        let h = heading("####").unwrap();
        assert_eq!(h.level, 4);
        assert_eq!(h.text, "");
    }

    #[test]
    fn rejects_interrupted_marker_run() {
        let err = heading("#a#b title").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedHeading {
                line: 1,
                text: "#a#b title".to_string()
            }
        );
    }

    #[test]
    fn lenient_mode_accepts_interrupted_run() {
        let options = ParseOptions {
            strict_headings: false,
            ..ParseOptions::default()
        };
        let h = extract_heading(
            Line {
                number: 1,
                text: "#a#b title",
            },
            &options,
        )
        .unwrap();
        assert_eq!(h.level, 1);
        assert_eq!(h.text, "a#b title");
    }

    #[test]
    fn zero_markers_is_never_a_heading() {
        assert!(matches!(
            heading("plain"),
            Err(ParseError::MalformedHeading { .. })
        ));
    }
}
