//! Fenced code block extraction.
//!
//! The extractor is a small state machine driven one line at a time:
//! `AwaitingFence -> InBlock -> Closed`. While `InBlock` it owns the line
//! cursor and appends every line verbatim, so body lines are never seen by
//! the dispatcher, the headline extractor or markup stripping.

use serde::Serialize;

use crate::error::ParseError;
use crate::lines::{Line, LineCursor};
use crate::syntax::Syntax;

/// A fenced code block captured verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// First word of the info string, empty when the fence has none.
    pub language: String,

    /// Everything after the opening fence marker, untouched.
    pub info: String,

    /// Lines between the fences, without terminators.
    pub lines: Vec<String>,

    /// Line number of the opening fence (1-indexed)
    pub line_number: usize,
}

impl CodeBlock {
    /// The body joined with `\n`.
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }

    /// Re-wrap the body in its fences, reproducing the original block.
    pub fn to_fenced(&self, syntax: &Syntax) -> String {
        let mut out = format!("{}{}\n", syntax.fence, self.info);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&syntax.fence);
        out
    }
}

/// Derive the language key from a fence info string.
///
/// Supports formats like:
/// - `rust`
/// - `rust ignore`
/// - ` python` (leading whitespace)
pub fn language_from_info(info: &str) -> String {
    info.split_whitespace().next().unwrap_or("").to_string()
}

/// Position of the extractor relative to a fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceState {
    AwaitingFence,
    InBlock {
        opened_at: usize,
        info: String,
        lines: Vec<String>,
    },
    Closed(CodeBlock),
}

impl FenceState {
    /// Feed one line and return the next state.
    pub fn advance(self, line: Line<'_>, syntax: &Syntax) -> Self {
        match self {
            Self::AwaitingFence => {
                if !syntax.opens_fence(line.text) {
                    return Self::AwaitingFence;
                }
                tracing::trace!(line = line.number, "fence opened");
                Self::InBlock {
                    opened_at: line.number,
                    info: line.text[syntax.fence.len()..].to_string(),
                    lines: Vec::new(),
                }
            }
            Self::InBlock {
                opened_at,
                info,
                mut lines,
            } => {
                if syntax.closes_fence(line.text) {
                    tracing::trace!(line = line.number, opened_at, "fence closed");
                    return Self::Closed(CodeBlock {
                        language: language_from_info(&info),
                        info,
                        lines,
                        line_number: opened_at,
                    });
                }
                lines.push(line.text.to_string());
                Self::InBlock {
                    opened_at,
                    info,
                    lines,
                }
            }
            closed @ Self::Closed(_) => closed,
        }
    }
}

/// Consume a fenced block starting at `open`.
///
/// Pulls lines from `cursor` until the closing fence. Running out of input
/// first yields [`ParseError::UnterminatedCodeBlock`] carrying the partial body.
pub fn extract_code_block(
    open: Line<'_>,
    cursor: &mut LineCursor<'_, '_>,
    syntax: &Syntax,
) -> Result<CodeBlock, ParseError> {
    let mut state = FenceState::AwaitingFence.advance(open, syntax);

    loop {
        state = match state {
            FenceState::Closed(block) => return Ok(block),
            FenceState::AwaitingFence => {
                return Err(ParseError::NoHandlerFound { line: open.number })
            }
            FenceState::InBlock {
                opened_at,
                info,
                lines,
            } => match cursor.next_line() {
                Some(line) => FenceState::InBlock {
                    opened_at,
                    info,
                    lines,
                }
                .advance(line, syntax),
                None => {
                    return Err(ParseError::UnterminatedCodeBlock {
                        opened_at,
                        language: language_from_info(&info),
                        partial: lines,
                    })
                }
            },
        };
    }
}
