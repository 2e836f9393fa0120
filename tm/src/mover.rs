//! Relocating item files between folders

use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Moves an item file into another directory
pub trait Mover {
    /// Move `source` into `dest_dir`, returning the new path.
    ///
    /// Fails without touching either file when the destination name is taken.
    fn relocate(&self, source: &Path, dest_dir: &Path) -> Result<PathBuf>;
}

/// Moves files with a filesystem rename
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMover;

impl Mover for FsMover {
    fn relocate(&self, source: &Path, dest_dir: &Path) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| eyre::eyre!("Not a file path: {}", source.display()))?;

        fs::create_dir_all(dest_dir).context(format!("Failed to create {}", dest_dir.display()))?;
        let dest = dest_dir.join(file_name);
        if fs::symlink_metadata(&dest).is_ok() {
            eyre::bail!("Refusing to overwrite existing {}", dest.display());
        }
        fs::rename(source, &dest).context(format!("Failed to move {} to {}", source.display(), dest.display()))?;

        debug!(?source, ?dest, "FsMover::relocate: moved");
        Ok(dest)
    }
}
