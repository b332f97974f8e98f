//! Whole-document splitting with regular expressions.
//!
//! Three passes over the full text instead of one pass over lines:
//!
//! 1. fenced blocks are matched and cut out,
//! 2. heading lines are matched in what is left and cut out,
//! 3. markup characters and line breaks are removed from the remainder.
//!
//! Fences go first so heading-like lines inside code are never counted. The
//! heading pattern needs a space after the marker run, so `##Compact` and
//! interrupted runs end up as content here instead of being headings or
//! errors. Content loses its line structure.

use regex::Regex;

use crate::codeblock::{language_from_info, CodeBlock};
use crate::content::strip_markup;
use crate::document::ParseResult;
use crate::error::ParseError;
use crate::syntax::ParseOptions;

/// Compiled patterns for one [`ParseOptions`].
#[derive(Debug, Clone)]
pub struct WholeDocumentParser {
    options: ParseOptions,
    fence: Regex,
    heading: Regex,
}

impl WholeDocumentParser {
    pub fn new(options: &ParseOptions) -> Result<Self, ParseError> {
        options.syntax.validate()?;

        let fence = regex::escape(&options.syntax.fence);
        let marker = regex::escape(&options.syntax.heading_marker.to_string());

        let fence = Regex::new(&format!(r"(?m)^{fence}([^\n]*)\n((?s:.*?))^{fence}$"))
            .map_err(|e| ParseError::InvalidSyntax(e.to_string()))?;
        let heading = Regex::new(&format!(r"(?m)^({marker}+) ([^\n]*)\n?"))
            .map_err(|e| ParseError::InvalidSyntax(e.to_string()))?;

        Ok(Self {
            options: options.clone(),
            fence,
            heading,
        })
    }

    pub fn parse(&self, source: &str) -> Result<ParseResult, ParseError> {
        let text = source.replace("\r\n", "\n");
        let mut result = ParseResult::default();

        let remaining = self.take_code(&text, &mut result)?;
        let remaining = self.take_headings(&remaining, &mut result);
        result.content = flatten_content(&remaining);

        tracing::debug!(
            headings = result.heading_count(),
            blocks = result.block_count(),
            "document split (whole)"
        );
        Ok(result)
    }

    /// Pass 1: cut out fenced blocks, failing on a fence left open.
    fn take_code(&self, text: &str, result: &mut ParseResult) -> Result<String, ParseError> {
        let mut remaining = String::with_capacity(text.len());
        let mut last = 0;

        for caps in self.fence.captures_iter(text) {
            let (Some(whole), Some(info), Some(body)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            self.check_gap(text, last, whole.start())?;
            remaining.push_str(&text[last..whole.start()]);
            last = whole.end();

            let block = CodeBlock {
                language: language_from_info(info.as_str()),
                info: info.as_str().to_string(),
                lines: body_lines(body.as_str()),
                line_number: line_at(text, whole.start()),
            };
            result
                .code
                .entry(block.language.clone())
                .or_default()
                .push(block);
        }

        self.check_gap(text, last, text.len())?;
        remaining.push_str(&text[last..]);
        Ok(remaining)
    }

    /// Any fence-open line between matched blocks was never closed.
    fn check_gap(&self, text: &str, start: usize, end: usize) -> Result<(), ParseError> {
        let syntax = &self.options.syntax;
        let mut offset = start;

        for line in text[start..end].split('\n') {
            if syntax.opens_fence(line) {
                let info = &line[syntax.fence.len()..];
                let after = (offset + line.len() + 1).min(text.len());
                return Err(ParseError::UnterminatedCodeBlock {
                    opened_at: line_at(text, offset),
                    language: language_from_info(info),
                    partial: text[after..].lines().map(str::to_string).collect(),
                });
            }
            offset += line.len() + 1;
        }
        Ok(())
    }

    /// Pass 2: cut out heading lines.
    fn take_headings(&self, text: &str, result: &mut ParseResult) -> String {
        let marker_len = self.options.syntax.heading_marker.len_utf8();

        for caps in self.heading.captures_iter(text) {
            let (Some(markers), Some(title)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            result
                .headlines
                .entry(markers.as_str().len() / marker_len)
                .or_default()
                .push(title.as_str().replace('`', ""));
        }

        self.heading.replace_all(text, "").into_owned()
    }
}

/// Split a captured body into lines; the newline before the closing fence
/// belongs to the delimiter.
fn body_lines(body: &str) -> Vec<String> {
    if body.is_empty() {
        return Vec::new();
    }
    let body = body.strip_suffix('\n').unwrap_or(body);
    body.split('\n').map(str::to_string).collect()
}

/// Pass 3: strip markup and fold the remaining lines into one line.
fn flatten_content(text: &str) -> String {
    text.lines()
        .map(strip_markup)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 1-based line number of a byte offset.
fn line_at(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

/// Split `source` with the whole-document strategy.
pub fn parse_whole(source: &str, options: &ParseOptions) -> Result<ParseResult, ParseError> {
    WholeDocumentParser::new(options)?.parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<ParseResult, ParseError> {
        parse_whole(source, &ParseOptions::default())
    }

    #[test]
    fn extracts_heading_levels() {
        let result = parse("# Title\n## Sub\n### Sub2\n").unwrap();
        assert_eq!(result.headings_at(1), &["Title".to_string()]);
        assert_eq!(result.headings_at(2), &["Sub".to_string()]);
        assert_eq!(result.headings_at(3), &["Sub2".to_string()]);
        assert_eq!(result.content, "");
    }

    #[test]
    fn fences_are_removed_before_headings() {
        let source = "# Real\n```sh\n# not a heading\necho hi\n```\n## Also real\n";
        let result = parse(source).unwrap();

        assert_eq!(result.heading_count(), 2);
        let block = &result.blocks_for("sh")[0];
        assert_eq!(
            block.lines,
            vec!["# not a heading".to_string(), "echo hi".to_string()]
        );
        assert_eq!(block.line_number, 2);
    }

    #[test]
    fn groups_blocks_by_language() {
        let source = "```python\na\n```\n```go\nb\n```\n```python\nc\n\n```\n";
        let result = parse(source).unwrap();

        assert_eq!(result.blocks_for("python").len(), 2);
        assert_eq!(result.blocks_for("go").len(), 1);
        assert_eq!(
            result.blocks_for("python")[1].lines,
            vec!["c".to_string(), String::new()]
        );
    }

    #[test]
    fn empty_block_has_no_lines() {
        let result = parse("```\n```").unwrap();
        assert!(result.blocks_for("")[0].lines.is_empty());
    }

    #[test]
    fn content_loses_line_breaks_and_markup() {
        let result = parse("plain *em*\n\n`code` _x_\n").unwrap();
        assert_eq!(result.content, "plain em code x");
    }

    #[test]
    fn heading_needs_a_space() {
        let result = parse("##Compact\n").unwrap();
        assert!(result.headlines.is_empty());
        assert_eq!(result.content, "##Compact");
    }

    #[test]
    fn unterminated_fence_is_reported() {
        let err = parse("# Doc\n```rust\nfn main() {}\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedCodeBlock {
                opened_at: 2,
                language: "rust".to_string(),
                partial: vec!["fn main() {}".to_string()],
            }
        );
    }

    #[test]
    fn handles_crlf_input() {
        let result = parse("# T\r\n```c\r\nint x;\r\n```\r\n").unwrap();
        assert_eq!(result.headings_at(1), &["T".to_string()]);
        assert_eq!(result.blocks_for("c")[0].lines, vec!["int x;".to_string()]);
    }

    #[test]
    fn empty_document() {
        assert_eq!(parse("").unwrap(), ParseResult::default());
    }
}
