//! Corpus-wide date normalization pass

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::frontmatter::rewrite_dates;
use crate::fsio::{markdown_files, write_atomic};

/// Files rewritten by a normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub modified: Vec<PathBuf>,
}

/// Normalize date fields in every `*.md` file of `dirs`.
///
/// Each changed file is committed before the next is read; a file that
/// cannot be read or written is logged and skipped.
pub fn normalize_corpus(dirs: &[PathBuf]) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for dir in dirs {
        for path in markdown_files(dir) {
            match normalize_file(&path) {
                Ok(true) => report.modified.push(path),
                Ok(false) => {}
                Err(e) => warn!(?path, error = %e, "normalize_corpus: skipping file"),
            }
        }
    }

    info!(modified = report.modified.len(), "Date normalization complete");
    report
}

/// Rewrite one file in place; `Ok(true)` when its content changed
pub fn normalize_file(path: &Path) -> eyre::Result<bool> {
    let content = fs::read_to_string(path)?;
    let rewrite = rewrite_dates(&content);
    if !rewrite.changed {
        return Ok(false);
    }

    write_atomic(path, &rewrite.content)?;
    debug!(?path, "normalize_file: rewrote dates");
    Ok(true)
}
