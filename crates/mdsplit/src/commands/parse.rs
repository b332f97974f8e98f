//! Split a single document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mdsplit_core::{parse_with, Strategy};

use crate::config::ConfigFile;

/// Run the parse command.
pub fn run(
    file: &Path,
    strategy: Option<Strategy>,
    pretty: bool,
    config: &ConfigFile,
) -> Result<()> {
    let strategy = strategy.unwrap_or(config.parse.strategy);
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let result = parse_with(strategy, &source, &config.parse.options)
        .with_context(|| format!("Failed to split {}", file.display()))?;

    tracing::info!(
        "Split {} ({}): {} headings, {} code blocks",
        file.display(),
        strategy,
        result.heading_count(),
        result.block_count()
    );

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(())
}
