//! Batch runner.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use mdsplit_core::{parse_with, ParseError, ParseOptions, ParseResult, Strategy};

use crate::discover::discover_documents;
use crate::mapping::{DirectoryMap, MappingEntry, MappingError};

/// What to do when one document fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure, record it in the report and carry on
    #[default]
    Skip,
    /// Abort the batch with the first failure
    Halt,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "halt" => Ok(Self::Halt),
            other => Err(format!("unknown policy '{other}' (expected 'skip' or 'halt')")),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Halt => write!(f, "halt"),
        }
    }
}

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Mapping file listing `directory:identifier` pairs
    pub mapping: PathBuf,

    /// Extension of the documents to pick up (without the dot)
    pub extension: String,

    pub on_error: FailurePolicy,

    /// Split the documents of a directory on the rayon pool
    pub parallel: bool,

    pub strategy: Strategy,

    pub options: ParseOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            mapping: PathBuf::from("config"),
            extension: "md".to_string(),
            on_error: FailurePolicy::default(),
            parallel: true,
            strategy: Strategy::default(),
            options: ParseOptions::default(),
        }
    }
}

/// Errors that can occur during a batch run.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: String,
        #[source]
        source: ParseError,
    },
}

impl BatchError {
    /// Line number of a parse failure, if the error carries one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ParseError { source, .. } => source.line(),
            _ => None,
        }
    }
}

/// Outcome for one document.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Parsed {
        result: ParseResult,
    },
    Failed {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryReport {
    pub identifier: String,
    pub directory: PathBuf,
    pub documents: Vec<DocumentReport>,

    /// Set when the directory itself could not be scanned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub directories: Vec<DirectoryReport>,

    /// Number of documents split successfully
    pub parsed: usize,

    /// Number of documents that failed
    pub failed: usize,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

/// Splits every document listed by a mapping file.
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Load the mapping file and run over every entry.
    pub fn run(&self) -> Result<BatchReport, BatchError> {
        let map = DirectoryMap::load(&self.config.mapping)?;
        self.run_map(&map)
    }

    /// Run over an already loaded mapping.
    pub fn run_map(&self, map: &DirectoryMap) -> Result<BatchReport, BatchError> {
        let start = Instant::now();
        let mut directories = Vec::with_capacity(map.len());

        for entry in map.entries() {
            tracing::info!(
                "Splitting {} ({})",
                entry.directory.display(),
                entry.identifier
            );
            directories.push(self.run_entry(entry)?);
        }

        let (parsed, failed) = directories
            .iter()
            .flat_map(|d| &d.documents)
            .fold((0, 0), |(ok, err), doc| match doc.outcome {
                Outcome::Parsed { .. } => (ok + 1, err),
                Outcome::Failed { .. } => (ok, err + 1),
            });

        Ok(BatchReport {
            directories,
            parsed,
            failed,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn run_entry(&self, entry: &MappingEntry) -> Result<DirectoryReport, BatchError> {
        let mut report = DirectoryReport {
            identifier: entry.identifier.clone(),
            directory: entry.directory.clone(),
            documents: Vec::new(),
            error: None,
        };

        let paths = match discover_documents(&entry.directory, &self.config.extension) {
            Ok(paths) => paths,
            Err(e) => {
                report.error = Some(self.skip_or_halt(e)?);
                return Ok(report);
            }
        };

        // Each document gets its own line sequence and extractor state
        let results: Vec<Result<ParseResult, BatchError>> = if self.config.parallel {
            paths.par_iter().map(|path| self.split_document(path)).collect()
        } else {
            paths.iter().map(|path| self.split_document(path)).collect()
        };

        for (path, result) in paths.into_iter().zip(results) {
            let outcome = match result {
                Ok(result) => Outcome::Parsed { result },
                Err(e) => {
                    let line = e.line();
                    Outcome::Failed {
                        error: self.skip_or_halt(e)?,
                        line,
                    }
                }
            };
            report.documents.push(DocumentReport { path, outcome });
        }

        Ok(report)
    }

    fn split_document(&self, path: &Path) -> Result<ParseResult, BatchError> {
        let source = fs::read_to_string(path).map_err(|source| BatchError::ReadError {
            path: path.display().to_string(),
            source,
        })?;

        let result = parse_with(self.config.strategy, &source, &self.config.options).map_err(
            |source| BatchError::ParseError {
                path: path.display().to_string(),
                source,
            },
        )?;

        tracing::debug!(
            "Split {}: {} headings, {} code blocks",
            path.display(),
            result.heading_count(),
            result.block_count()
        );
        Ok(result)
    }

    /// Under `halt` hand the error back; under `skip` log it and return its message.
    fn skip_or_halt(&self, error: BatchError) -> Result<String, BatchError> {
        match self.config.on_error {
            FailurePolicy::Halt => Err(error),
            FailurePolicy::Skip => {
                tracing::warn!("Skipping: {}", error);
                Ok(error.to_string())
            }
        }
    }
}
