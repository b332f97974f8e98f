//! Strategy selection and cross-checking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatcher;
use crate::document::{Channel, ParseResult};
use crate::error::ParseError;
use crate::syntax::ParseOptions;
use crate::whole::parse_whole;

/// How a document is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Single forward pass with line dispatch.
    #[default]
    Lines,
    /// Three regex passes over the whole text. Coarser; content is flattened.
    Whole,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "line" => Ok(Self::Lines),
            "whole" | "regex" => Ok(Self::Whole),
            other => Err(format!("unknown strategy '{other}' (expected 'lines' or 'whole')")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines => write!(f, "lines"),
            Self::Whole => write!(f, "whole"),
        }
    }
}

/// Split `source` with the line-dispatch strategy.
pub fn parse(source: &str, options: &ParseOptions) -> Result<ParseResult, ParseError> {
    options.syntax.validate()?;
    Dispatcher::standard(options).parse(source)
}

/// Split `source` with the chosen strategy.
pub fn parse_with(
    strategy: Strategy,
    source: &str,
    options: &ParseOptions,
) -> Result<ParseResult, ParseError> {
    match strategy {
        Strategy::Lines => parse(source, options),
        Strategy::Whole => parse_whole(source, options),
    }
}

/// Both strategies' results for one document.
#[derive(Debug, Clone)]
pub struct CrossCheck {
    pub lines: Result<ParseResult, ParseError>,
    pub whole: Result<ParseResult, ParseError>,
}

impl CrossCheck {
    /// Channels on which the strategies disagree. Content is compared with
    /// line breaks folded, since the whole-document strategy drops them.
    pub fn diverging_channels(&self) -> Vec<Channel> {
        match (&self.lines, &self.whole) {
            (Ok(lines), Ok(whole)) => {
                let mut channels = Vec::new();
                if lines.headlines != whole.headlines {
                    channels.push(Channel::Headlines);
                }
                if lines.code != whole.code {
                    channels.push(Channel::Code);
                }
                if fold_lines(&lines.content) != fold_lines(&whole.content) {
                    channels.push(Channel::Content);
                }
                channels
            }
            (Err(a), Err(b)) if a == b => Vec::new(),
            _ => vec![Channel::Headlines, Channel::Code, Channel::Content],
        }
    }

    pub fn agrees(&self) -> bool {
        self.diverging_channels().is_empty()
    }
}

fn fold_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run both strategies over `source`.
pub fn cross_check(source: &str, options: &ParseOptions) -> CrossCheck {
    CrossCheck {
        lines: parse_with(Strategy::Lines, source, options),
        whole: parse_with(Strategy::Whole, source, options),
    }
}
