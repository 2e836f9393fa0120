//! Typed errors for taskmd

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the invoker before any corpus work starts
#[derive(Debug, Error)]
pub enum TaskmdError {
    #[error("Configuration not found (searched: {})\nRun `tm setup --root <dir>` to configure taskmd.", display_paths(.searched))]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Unknown link format: {0}. Use: obsidian or markdown")]
    UnknownLinkFormat(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
