//! Document discovery in a mapped directory.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::runner::BatchError;

static SEQUENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid sequence regex"));

/// The first run of digits in a file stem (`lesson-12-intro` -> 12).
pub fn sequence_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    SEQUENCE_RE.find(stem)?.as_str().parse().ok()
}

/// Documents directly inside `dir` with the given extension, in sequence
/// order. Files without a sequence number come last, ordered by name.
pub fn discover_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::DirectoryNotFound(dir.display().to_string()));
    }

    let mut documents: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect();

    // Numbered files first, in numeric order; the rest by name
    documents.sort_by_cached_key(|path| {
        let rank = match sequence_number(path) {
            Some(n) => (0, n),
            None => (1, 0),
        };
        (rank, path.file_name().map(|n| n.to_os_string()))
    });

    tracing::debug!("Found {} documents in {}", documents.len(), dir.display());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn extracts_first_digit_run() {
        assert_eq!(sequence_number(Path::new("basic10.md")), Some(10));
        assert_eq!(sequence_number(Path::new("dir/07-setup-2.md")), Some(7));
        assert_eq!(sequence_number(Path::new("notes.md")), None);
    }

    #[test]
    fn sorts_numerically_then_unnumbered_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["basic10.md", "basic2.md", "zeta.md", "alpha.md", "basic1.md", "skip.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("basic0.md"), "").unwrap();

        let names: Vec<String> = discover_documents(dir.path(), "md")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            names,
            vec!["basic1.md", "basic2.md", "basic10.md", "alpha.md", "zeta.md"]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = discover_documents(Path::new("/nonexistent/dir"), "md").unwrap_err();
        assert!(matches!(err, BatchError::DirectoryNotFound(_)));
    }
}
