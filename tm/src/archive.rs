//! Archiving completed one-off tasks

use serde::Serialize;
use tracing::{info, warn};

use crate::classify::Classification;
use crate::config::Config;
use crate::mover::Mover;
use crate::scanner::{Predicate, Scanner};

/// Outcome of an archive pass, by item stem
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    /// Moved to the completed folder
    pub archived: Vec<String>,
    /// Completed but recurring, left in place
    pub skipped: Vec<String>,
}

/// Move every archive-eligible task into the `completed` folder
pub fn archive_completed(config: &Config, mover: &dyn Mover) -> ArchiveReport {
    let completed_dir = config.folder("completed");
    let mut report = ArchiveReport::default();

    for item in Scanner::dir(config.folder("tasks")).scan(&Predicate::has_field("completed")) {
        let class = Classification::of(&item.frontmatter);
        if !class.archive_eligible() {
            report.skipped.push(item.id);
            continue;
        }

        match mover.relocate(&item.path, &completed_dir) {
            Ok(_) => report.archived.push(item.id),
            Err(e) => warn!(path = ?item.path, error = %e, "archive_completed: move failed"),
        }
    }

    info!(
        archived = report.archived.len(),
        skipped = report.skipped.len(),
        "Archive pass complete"
    );
    report
}
