//! Directory to identifier mapping file.
//!
//! One `directory:identifier` entry per line:
//!
//! ```text
//! # chapters
//! intro:ch01
//! advanced/topics:ch02
//! ```

use std::fs;
use std::path::{Path, PathBuf};

/// A directory and the identifier its documents are reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub directory: PathBuf,
    pub identifier: String,
}

/// Ordered list of mapping entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryMap {
    entries: Vec<MappingEntry>,
}

/// Errors that can occur when loading a mapping file.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("Failed to read mapping file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed mapping at line {line}: {text:?} (expected 'directory:identifier')")]
    MalformedLine { line: usize, text: String },
}

impl DirectoryMap {
    /// Parse mapping text. Relative directories are joined onto `base`.
    pub fn parse(text: &str, base: &Path) -> Result<Self, MappingError> {
        let mut entries = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = || MappingError::MalformedLine {
                line: index + 1,
                text: raw.to_string(),
            };

            let mut parts = line.split(':');
            let (Some(directory), Some(identifier), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(malformed());
            };

            let (directory, identifier) = (directory.trim(), identifier.trim());
            if directory.is_empty() || identifier.is_empty() {
                return Err(malformed());
            }

            entries.push(MappingEntry {
                directory: base.join(directory),
                identifier: identifier.to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Load a mapping file; relative directories resolve against its parent.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let text = fs::read_to_string(path).map_err(|source| MappingError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let base = path.parent().unwrap_or(Path::new(""));
        let map = Self::parse(&text, base)?;

        tracing::debug!(
            "Loaded {} mapping entries from {}",
            map.len(),
            path.display()
        );
        Ok(map)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
