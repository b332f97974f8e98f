//! Cross-check the two splitting strategies.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mdsplit_core::{cross_check, Channel};

use crate::config::ConfigFile;

/// Run the check command.
pub fn run(file: &Path, config: &ConfigFile) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let check = cross_check(&source, &config.parse.options);

    for (name, result) in [("lines", &check.lines), ("whole", &check.whole)] {
        if let Err(e) = result {
            tracing::warn!("{} strategy failed: {}", name, e);
        }
    }

    let diverging = check.diverging_channels();
    for channel in &diverging {
        tracing::warn!("Strategies disagree on {}", channel.name());
    }

    // Content always differs in line structure; only structural channels fail the check
    if diverging
        .iter()
        .any(|c| matches!(c, Channel::Headlines | Channel::Code))
    {
        anyhow::bail!(
            "{}: strategies disagree on {}",
            file.display(),
            diverging
                .iter()
                .map(Channel::name)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    tracing::info!("{}: strategies agree", file.display());
    Ok(())
}
