//! Markdown splitter separating headlines, fenced code blocks and plain content.
//!
//! A document is split into three disjoint channels in a single forward pass:
//! each line is dispatched on its leading token to the headline extractor, the
//! code block extractor or the content accumulator, and the assembler groups
//! the results. Code block bodies are consumed verbatim by the extractor that
//! opened them, so nothing inside a fence is ever read as a heading or markup.
//!
//! A coarser regex-based strategy ([`whole`]) is kept for cross-checking.

pub mod codeblock;
pub mod content;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod headline;
pub mod lines;
pub mod strategy;
pub mod syntax;
pub mod whole;

pub use codeblock::CodeBlock;
pub use dispatch::{Dispatcher, LineHandler};
pub use document::{Channel, Claim, ParseResult};
pub use error::ParseError;
pub use headline::Heading;
pub use lines::{Document, Line, LineCursor};
pub use strategy::{cross_check, parse, parse_with, CrossCheck, Strategy};
pub use syntax::{ParseOptions, Syntax};
pub use whole::parse_whole;
