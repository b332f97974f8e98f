//! Configuration file (mdsplit.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mdsplit_batch::{BatchConfig, FailurePolicy};
use mdsplit_core::{ParseOptions, Strategy};
use serde::Deserialize;

/// Configuration file structure (mdsplit.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub parse: ParseSettings,
    #[serde(default)]
    pub batch: BatchSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct ParseSettings {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(flatten)]
    pub options: ParseOptions,
}

#[derive(Debug, Deserialize)]
pub struct BatchSettings {
    #[serde(default = "default_mapping")]
    pub mapping: PathBuf,
    #[serde(default)]
    pub on_error: FailurePolicy,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            mapping: default_mapping(),
            on_error: FailurePolicy::default(),
            parallel: default_parallel(),
            extension: default_extension(),
        }
    }
}

fn default_mapping() -> PathBuf {
    PathBuf::from("config")
}
fn default_parallel() -> bool {
    true
}
fn default_extension() -> String {
    "md".to_string()
}

impl ConfigFile {
    /// Batch settings merged with the parse settings.
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            mapping: self.batch.mapping.clone(),
            extension: self.batch.extension.clone(),
            on_error: self.batch.on_error,
            parallel: self.batch.parallel,
            strategy: self.parse.strategy,
            options: self.parse.options.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

pub const DEFAULT_CONFIG: &str = r##"# mdsplit configuration

[parse]
# Splitting strategy: "lines" (single pass) or "whole" (regex passes)
strategy = "lines"

# Character whose leading run marks a heading
heading_marker = "#"

# Delimiter opening and closing a fenced code block
fence = "```"

# Fail on marker runs interrupted before the first space (e.g. "#a#b title")
strict_headings = true

[batch]
# Mapping file with one "directory:identifier" entry per line
mapping = "config"

# What to do when a document fails: "skip" or "halt"
on_error = "skip"

# Split the documents of a directory in parallel
parallel = true

# Extension of the documents to pick up
extension = "md"
"##;
