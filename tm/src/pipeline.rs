//! The full `generate` run: normalize, archive, then rebuild digests

use chrono::NaiveDate;
use eyre::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::archive::{ArchiveReport, archive_completed};
use crate::config::Config;
use crate::dates::WeekDates;
use crate::digest::{DigestBuilder, DigestSummary};
use crate::mover::Mover;
use crate::normalize::{NormalizeReport, normalize_corpus};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub normalize: NormalizeReport,
    pub weeks: WeekDates,
    pub archive: ArchiveReport,
    pub digests: DigestSummary,
}

/// Run every pass in order against the corpus described by `config`
pub fn generate(config: &Config, reference: NaiveDate, mover: &dyn Mover) -> Result<GenerateReport> {
    info!(reference = %reference, root = ?config.root(), "generate: starting");

    let normalize = normalize_corpus(&config.task_dirs());
    let weeks = WeekDates::for_date(reference);
    let archive = archive_completed(config, mover);
    let digests = DigestBuilder::new(config, reference)
        .write_all()
        .context("Failed to write digest files")?;

    Ok(GenerateReport {
        normalize,
        weeks,
        archive,
        digests,
    })
}
