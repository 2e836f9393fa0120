//! Filesystem helpers shared by the corpus passes

use eyre::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Replace `path` with `content` via a temp file in the same directory.
///
/// The temp file is renamed over the destination only after a successful
/// flush; on any earlier failure it is dropped and removed. A symlinked
/// destination is replaced at its target, and an existing file keeps its
/// permissions.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).context(format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .context(format!("Failed to write temp file for {}", path.display()))?;
    if let Ok(metadata) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .context(format!("Failed to copy permissions of {}", target.display()))?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&target)
        .map_err(|e| e.error)
        .context(format!("Failed to replace {}", target.display()))?;

    debug!(?path, ?target, bytes = content.len(), "write_atomic: persisted");
    Ok(())
}

/// `*.md` files directly inside `dir`, sorted by file name.
///
/// Symlinks are followed. A missing directory is empty; unreadable
/// entries and dangling links are skipped.
pub fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!(?dir, "markdown_files: directory missing, treating as empty");
        return Vec::new();
    }

    WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(?dir, error = %e, "markdown_files: skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().map(|e| e == "md").unwrap_or(false))
        .collect()
}

/// File name without directory or extension
pub fn stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("task.md");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new content");
        let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_write_atomic_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent").join("task.md");

        assert!(write_atomic(&path, "x").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_markdown_files_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.md"), "").unwrap();
        fs::write(temp.path().join("a.md"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp.path().join("nested.md")).unwrap();
        fs::write(temp.path().join("nested.md").join("c.md"), "").unwrap();

        let files = markdown_files(temp.path());
        let names: Vec<String> = files.iter().map(|p| stem(p)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_markdown_files_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(markdown_files(&temp.path().join("nope")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("task.md");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, "new").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_through_symlink_keeps_link() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("real.md");
        let link = temp.path().join("link.md");
        fs::write(&target, "old").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        write_atomic(&link, "new").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_markdown_files_follows_symlinks() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("shared.md");
        fs::write(&target, "").unwrap();
        fs::write(temp.path().join("a.md"), "").unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("link.md")).unwrap();
        std::os::unix::fs::symlink(outside.path().join("gone.md"), temp.path().join("dangling.md")).unwrap();

        let files = markdown_files(temp.path());
        assert_eq!(files, vec![temp.path().join("a.md"), temp.path().join("link.md")]);
    }
}
