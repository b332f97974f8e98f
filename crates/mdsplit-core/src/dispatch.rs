//! Line classification and dispatch.
//!
//! A [`Dispatcher`] holds an ordered list of [`LineHandler`]s built once up
//! front. Each line goes to the first handler whose predicate matches, so the
//! registration order is the match priority. The standard set is heading,
//! fence, then the unconditional content handler.

use crate::codeblock::extract_code_block;
use crate::document::{Assembler, Claim, ParseResult};
use crate::error::ParseError;
use crate::headline::extract_heading;
use crate::lines::{Document, Line, LineCursor};
use crate::syntax::ParseOptions;

/// A predicate and the extractor for the lines it accepts.
pub trait LineHandler: Send + Sync {
    /// Handler identifier (e.g., "heading", "fence")
    fn name(&self) -> &'static str;

    /// Whether this handler claims `line`.
    fn matches(&self, line: &str) -> bool;

    /// Extract the claimed line. Handlers that span several lines pull the
    /// rest from `cursor`.
    fn handle(&self, line: Line<'_>, cursor: &mut LineCursor<'_, '_>)
        -> Result<Claim, ParseError>;
}

/// Claims lines starting with the heading marker.
#[derive(Debug, Clone, Default)]
pub struct HeadingHandler {
    options: ParseOptions,
}

impl HeadingHandler {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl LineHandler for HeadingHandler {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn matches(&self, line: &str) -> bool {
        self.options.syntax.opens_heading(line)
    }

    fn handle(
        &self,
        line: Line<'_>,
        _cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Claim, ParseError> {
        extract_heading(line, &self.options).map(Claim::Heading)
    }
}

/// Claims a fence-open line and the block it opens.
#[derive(Debug, Clone, Default)]
pub struct FenceHandler {
    options: ParseOptions,
}

impl FenceHandler {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl LineHandler for FenceHandler {
    fn name(&self) -> &'static str {
        "fence"
    }

    fn matches(&self, line: &str) -> bool {
        self.options.syntax.opens_fence(line)
    }

    fn handle(
        &self,
        line: Line<'_>,
        cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Claim, ParseError> {
        extract_code_block(line, cursor, &self.options.syntax).map(Claim::Code)
    }
}

/// Claims every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHandler;

impl LineHandler for ContentHandler {
    fn name(&self) -> &'static str {
        "content"
    }

    fn matches(&self, _line: &str) -> bool {
        true
    }

    fn handle(
        &self,
        line: Line<'_>,
        _cursor: &mut LineCursor<'_, '_>,
    ) -> Result<Claim, ParseError> {
        Ok(Claim::Content(line.text.to_string()))
    }
}

/// Ordered handler list driving a single forward pass.
pub struct Dispatcher {
    handlers: Vec<Box<dyn LineHandler>>,
}

impl Dispatcher {
    /// Create a dispatcher with no handlers.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// The heading, fence and content handlers, in that priority.
    pub fn standard(options: &ParseOptions) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(HeadingHandler::new(options.clone()));
        dispatcher.register(FenceHandler::new(options.clone()));
        dispatcher.register(ContentHandler);
        dispatcher
    }

    /// Append a handler at the lowest priority.
    pub fn register<H: LineHandler + 'static>(&mut self, handler: H) {
        self.handlers.push(Box::new(handler));
    }

    /// Handler names in match priority order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// The first handler accepting `line`.
    pub fn classify(&self, line: Line<'_>) -> Result<&dyn LineHandler, ParseError> {
        self.handlers
            .iter()
            .find(|h| h.matches(line.text))
            .map(|h| h.as_ref())
            .ok_or(ParseError::NoHandlerFound { line: line.number })
    }

    /// Split `source` in one pass over its lines.
    pub fn parse(&self, source: &str) -> Result<ParseResult, ParseError> {
        let document = Document::new(source);
        let mut cursor = document.cursor();
        let mut assembler = Assembler::new();

        while let Some(line) = cursor.next_line() {
            let handler = self.classify(line)?;
            let claim = handler.handle(line, &mut cursor)?;
            tracing::trace!(
                line = line.number,
                handler = handler.name(),
                channel = claim.channel().name(),
                "dispatch"
            );
            assembler.merge(claim);
        }

        let result = assembler.finish();
        tracing::debug!(
            lines = document.len(),
            headings = result.heading_count(),
            blocks = result.block_count(),
            "document split"
        );
        Ok(result)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::standard(&ParseOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn parse(source: &str) -> Result<ParseResult, ParseError> {
        Dispatcher::default().parse(source)
    }

    #[test]
    fn standard_priority_ends_with_content() {
        assert_eq!(
            Dispatcher::default().handler_names(),
            vec!["heading", "fence", "content"]
        );
    }

    #[test]
    fn classifies_by_leading_token() {
        let dispatcher = Dispatcher::default();
        let name = |text: &str| {
            dispatcher
                .classify(Line { number: 1, text })
                .map(|h| h.name())
                .unwrap()
        };
        assert_eq!(name("# Title"), "heading");
        assert_eq!(name("```rust"), "fence");
        assert_eq!(name(""), "content");
        assert_eq!(name("text # with marker"), "content");
    }

    #[test]
    fn empty_dispatcher_reports_no_handler() {
        let err = Dispatcher::new().parse("line one").unwrap_err();
        assert_eq!(err, ParseError::NoHandlerFound { line: 1 });
    }

    #[test]
    fn extracts_heading_levels() {
        let result = parse("# Title\n## Sub\n### Sub2\n").unwrap();
        let expected: BTreeMap<usize, Vec<String>> = [
            (1, vec!["Title".to_string()]),
            (2, vec!["Sub".to_string()]),
            (3, vec!["Sub2".to_string()]),
        ]
        .into_iter()
        .collect();
        assert_eq!(result.headlines, expected);
        assert!(result.code.is_empty());
        assert_eq!(result.content, "");
    }

    #[test]
    fn groups_code_blocks_by_language() {
        let source = r#"# Examples

```python
print("one")
```

```go
fmt.Println("go")
```

```python
print("two")
x = 1
```
"#;
        let result = parse(source).unwrap();

        assert_eq!(result.blocks_for("python").len(), 2);
        assert_eq!(result.blocks_for("go").len(), 1);
        assert_eq!(
            result.blocks_for("python")[1].lines,
            vec!["print(\"two\")".to_string(), "x = 1".to_string()]
        );
        assert_eq!(result.blocks_for("go")[0].line_number, 7);
        assert_eq!(result.content, "\n\n");
    }

    #[test]
    fn heading_marker_inside_fence_stays_code() {
        let result = parse("```sh\n# not a heading\n```\n").unwrap();

        assert!(result.headlines.is_empty());
        assert_eq!(
            result.blocks_for("sh")[0].lines,
            vec!["# not a heading".to_string()]
        );
        assert_eq!(result.content, "");
    }

    #[test]
    fn unterminated_fence_fails_the_parse() {
        let err = parse("# Doc\n\n```rust\nfn main() {\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedCodeBlock {
                opened_at: 3,
                language: "rust".to_string(),
                partial: vec!["fn main() {".to_string()],
            }
        );
    }

    #[test]
    fn strips_markup_from_content() {
        let result = parse("plain *em* `code` _x_").unwrap();
        assert_eq!(result.content, "plain em code x");
    }

    #[test]
    fn empty_document() {
        assert_eq!(parse("").unwrap(), ParseResult::default());
    }

    #[test]
    fn every_line_is_claimed_once() {
        let source = "# A\ntext *one*\n```rs\nlet a = 1;\n# inner\n```\n\n## B\nmore\n```\n```";
        let result = parse(source).unwrap();

        // Fence delimiter lines are the only ones not carried by a channel.
        let delimiters = 4;
        let content_lines = result.content.split('\n').count();
        let code_lines: usize = result
            .code
            .values()
            .flatten()
            .map(|b| b.lines.len())
            .sum();
        assert_eq!(
            result.heading_count() + code_lines + content_lines + delimiters,
            source.lines().count()
        );
        assert_eq!(result.content, "text one\n\nmore");
        assert_eq!(result.blocks_for("").len(), 1);
    }

    #[test]
    fn malformed_heading_aborts_with_line_number() {
        let err = parse("intro\n#x#y heading").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn custom_handler_takes_priority_order() {
        struct Quote;
        impl LineHandler for Quote {
            fn name(&self) -> &'static str {
                "quote"
            }
            fn matches(&self, line: &str) -> bool {
                line.starts_with('>')
            }
            fn handle(
                &self,
                line: Line<'_>,
                _cursor: &mut LineCursor<'_, '_>,
            ) -> Result<Claim, ParseError> {
                Ok(Claim::Content(line.text.trim_start_matches('>').trim().to_string()))
            }
        }

        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Quote);
        dispatcher.register(ContentHandler);

        let result = dispatcher.parse("> quoted\nplain").unwrap();
        assert_eq!(result.content, "quoted\nplain");
    }
}
