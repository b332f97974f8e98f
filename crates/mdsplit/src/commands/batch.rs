//! Batch split command.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use mdsplit_batch::{BatchRunner, FailurePolicy};

use crate::config::ConfigFile;

/// Run the batch command.
pub fn run(
    mapping: Option<PathBuf>,
    on_error: Option<FailurePolicy>,
    output: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<()> {
    let mut batch = config.batch_config();
    if let Some(mapping) = mapping {
        batch.mapping = mapping;
    }
    if let Some(on_error) = on_error {
        batch.on_error = on_error;
    }

    tracing::info!(
        "Splitting documents listed in {} (on error: {})",
        batch.mapping.display(),
        batch.on_error
    );

    let report = BatchRunner::new(batch).run()?;

    tracing::info!(
        "Split {} documents ({} failed) in {}ms",
        report.parsed,
        report.failed,
        report.duration_ms
    );

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Report: {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
