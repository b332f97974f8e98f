//! Split result and the assembler that builds it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codeblock::CodeBlock;
use crate::content::ContentAccumulator;
use crate::headline::Heading;

/// The three output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Headlines,
    Code,
    Content,
}

impl Channel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Headlines => "headlines",
            Self::Code => "code",
            Self::Content => "content",
        }
    }
}

/// What a handler produced for the line(s) it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    Heading(Heading),
    Code(CodeBlock),
    /// A raw content line; markup is stripped on merge.
    Content(String),
}

impl Claim {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Heading(_) => Channel::Headlines,
            Self::Code(_) => Channel::Code,
            Self::Content(_) => Channel::Content,
        }
    }
}

/// A document split into headlines, code blocks and plain content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Heading titles per level, in document order.
    pub headlines: BTreeMap<usize, Vec<String>>,

    /// Code blocks per language, in document order.
    pub code: BTreeMap<String, Vec<CodeBlock>>,

    /// Remaining lines with inline markup removed.
    pub content: String,
}

impl ParseResult {
    pub fn heading_count(&self) -> usize {
        self.headlines.values().map(Vec::len).sum()
    }

    pub fn block_count(&self) -> usize {
        self.code.values().map(Vec::len).sum()
    }

    /// Headings of one level, empty when the level never occurs.
    pub fn headings_at(&self, level: usize) -> &[String] {
        self.headlines.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Code blocks of one language, empty when the language never occurs.
    pub fn blocks_for(&self, language: &str) -> &[CodeBlock] {
        self.code.get(language).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty() && self.code.is_empty() && self.content.is_empty()
    }
}

/// Merges handler claims into a [`ParseResult`].
#[derive(Debug, Default)]
pub struct Assembler {
    headlines: BTreeMap<usize, Vec<String>>,
    code: BTreeMap<String, Vec<CodeBlock>>,
    content: ContentAccumulator,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, claim: Claim) {
        match claim {
            Claim::Heading(heading) => self
                .headlines
                .entry(heading.level)
                .or_default()
                .push(heading.text),
            Claim::Code(block) => self
                .code
                .entry(block.language.clone())
                .or_default()
                .push(block),
            Claim::Content(line) => self.content.push(&line),
        }
    }

    pub fn finish(self) -> ParseResult {
        ParseResult {
            headlines: self.headlines,
            code: self.code,
            content: self.content.finish(),
        }
    }
}
