//! Sorting reviewed files out of the import folder by their `type:` field

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::config::Config;
use crate::fsio::{markdown_files, stem};
use crate::mover::Mover;
use crate::scanner::Item;

/// Destination folders in report order
pub const IMPORT_FOLDERS: [&str; 5] = ["tasks", "ideas", "bugs", "memories", "templates"];

/// Logical folder for a `type:` value
pub fn folder_for_type(item_type: &str) -> Option<&'static str> {
    match item_type {
        "task" => Some("tasks"),
        "idea" => Some("ideas"),
        "template" => Some("templates"),
        "memory" => Some("memories"),
        "bug" => Some("bugs"),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// False when the import folder does not exist
    pub import_dir_exists: bool,
    /// Logical folder -> moved stems
    pub moved: BTreeMap<String, Vec<String>>,
    /// File names without a recognized type
    pub skipped: Vec<String>,
}

impl ImportReport {
    pub fn total_moved(&self) -> usize {
        self.moved.values().map(Vec::len).sum()
    }

    /// Moved groups in [`IMPORT_FOLDERS`] order
    pub fn groups(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        IMPORT_FOLDERS
            .iter()
            .filter_map(|folder| self.moved.get(*folder).map(|stems| (*folder, stems.as_slice())))
    }
}

/// Move each typed file in `import` to the folder its type maps to
pub fn clean_imports(config: &Config, mover: &dyn Mover) -> ImportReport {
    let import_dir = config.folder("import");
    let mut report = ImportReport {
        import_dir_exists: import_dir.is_dir(),
        ..Default::default()
    };

    for path in markdown_files(&import_dir) {
        let folder = Item::load(&path)
            .and_then(|item| item.frontmatter.field_value("type").map(str::to_string))
            .and_then(|item_type| folder_for_type(&item_type));

        let Some(folder) = folder else {
            if let Some(name) = path.file_name() {
                report.skipped.push(name.to_string_lossy().to_string());
            }
            continue;
        };

        match mover.relocate(&path, &config.folder(folder)) {
            Ok(_) => report.moved.entry(folder.to_string()).or_default().push(stem(&path)),
            Err(e) => warn!(?path, error = %e, "clean_imports: move failed"),
        }
    }

    info!(
        moved = report.total_moved(),
        skipped = report.skipped.len(),
        "Import cleanup complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::FsMover;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_imports_routes_by_type() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new(temp.path());
        config.folders.insert("ideas".to_string(), "Ideas".to_string());
        let import = config.folder("import");
        fs::create_dir_all(&import).unwrap();
        fs::write(import.join("fix-login.md"), "---\ntype: bug\n---\n").unwrap();
        fs::write(import.join("pay-rent.md"), "---\ntype: task\ndue: 2025-10-05\n---\n").unwrap();
        fs::write(import.join("garden.md"), "---\ntype: idea\n---\n").unwrap();
        fs::write(import.join("mystery.md"), "---\ntype: poem\n---\n").unwrap();
        fs::write(import.join("untyped.md"), "just text\ntype: task\n").unwrap();

        let report = clean_imports(&config, &FsMover);

        assert!(report.import_dir_exists);
        assert_eq!(report.total_moved(), 3);
        assert_eq!(report.skipped, vec!["mystery.md", "untyped.md"]);
        assert!(temp.path().join("Ideas").join("garden.md").exists());
        assert!(temp.path().join("bugs").join("fix-login.md").exists());
        assert!(import.join("untyped.md").exists());

        let order: Vec<&str> = report.groups().map(|(folder, _)| folder).collect();
        assert_eq!(order, vec!["tasks", "ideas", "bugs"]);
    }

    #[test]
    fn test_clean_imports_missing_folder() {
        let temp = TempDir::new().unwrap();
        let config = Config::new(temp.path());

        let report = clean_imports(&config, &FsMover);
        assert!(!report.import_dir_exists);
        assert_eq!(report.total_moved(), 0);
    }

    #[test]
    fn test_folder_for_type() {
        assert_eq!(folder_for_type("memory"), Some("memories"));
        assert_eq!(folder_for_type("Task"), None);
    }
}
