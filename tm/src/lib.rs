//! taskmd - date normalization and task digests for a Markdown knowledge base
//!
//! Items are Markdown files whose frontmatter is treated as plain
//! `key: value` lines. The crate normalizes date fields in place, archives
//! completed tasks, sorts the import folder, and regenerates three digest
//! documents at the root of the knowledge base.
//!
//! # Layout
//!
//! ```text
//! <tasks-root>/
//! ├── today.md          # generated
//! ├── this-week.md      # generated
//! ├── next-week.md      # generated
//! ├── tasks/
//! ├── ideas/
//! ├── bugs/
//! ├── import/
//! ├── completed/
//! ├── templates/
//! └── memories/
//! ```
//!
//! # Example
//!
//! ```ignore
//! use taskmd::{Config, DigestBuilder};
//!
//! let config = Config::load(None)?;
//! taskmd::normalize_corpus(&config.task_dirs());
//! DigestBuilder::new(&config, chrono::Local::now().date_naive()).write_all()?;
//! ```

pub mod archive;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dates;
pub mod digest;
pub mod error;
pub mod frontmatter;
pub mod fsio;
pub mod import;
pub mod link;
pub mod mover;
pub mod normalize;
pub mod pipeline;
pub mod scanner;

pub use archive::{ArchiveReport, archive_completed};
pub use classify::Classification;
pub use config::Config;
pub use dates::{WeekDates, normalize_date};
pub use digest::{Digest, DigestBuilder, DigestKind, DigestSummary};
pub use error::TaskmdError;
pub use frontmatter::{Frontmatter, Rewrite, rewrite_dates};
pub use import::{ImportReport, clean_imports};
pub use link::LinkFormat;
pub use mover::{FsMover, Mover};
pub use normalize::{NormalizeReport, normalize_corpus};
pub use pipeline::{GenerateReport, generate};
pub use scanner::{Item, Predicate, Scanner};
