//! Corpus scanning by frontmatter predicates

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::frontmatter::Frontmatter;
use crate::fsio::{markdown_files, stem};

/// One file in the corpus with a readable frontmatter block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// File stem, unique within the corpus
    pub id: String,
    pub path: PathBuf,
    pub frontmatter: Frontmatter,
}

impl Item {
    /// Read an item from disk; `None` when unreadable or without frontmatter
    pub fn load(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(?path, error = %e, "Item::load: skipping unreadable file");
                return None;
            }
        };

        let Some(frontmatter) = Frontmatter::from_content(&content) else {
            debug!(?path, "Item::load: no frontmatter");
            return None;
        };

        Some(Self {
            id: stem(path),
            path: path.to_path_buf(),
            frontmatter,
        })
    }
}

/// Frontmatter predicate applied during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// A line starts with `key:`
    HasField(String),
    /// A line reads exactly `key: value`
    FieldEquals(String, String),
    /// The tags block contains the tag
    HasTag(String),
    /// Every inner predicate holds
    All(Vec<Predicate>),
    /// At least one inner predicate holds
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn has_field(key: &str) -> Self {
        Self::HasField(key.to_string())
    }

    pub fn field_equals(key: &str, value: &str) -> Self {
        Self::FieldEquals(key.to_string(), value.to_string())
    }

    pub fn has_tag(tag: &str) -> Self {
        Self::HasTag(tag.to_string())
    }

    pub fn matches(&self, frontmatter: &Frontmatter) -> bool {
        match self {
            Self::HasField(key) => frontmatter.has_field(key),
            Self::FieldEquals(key, value) => frontmatter.field_equals(key, value),
            Self::HasTag(tag) => frontmatter.has_tag(tag),
            Self::All(inner) => inner.iter().all(|p| p.matches(frontmatter)),
            Self::Any(inner) => inner.iter().any(|p| p.matches(frontmatter)),
        }
    }
}

/// Scans a fixed set of directories, re-reading files on every call
#[derive(Debug, Clone)]
pub struct Scanner {
    dirs: Vec<PathBuf>,
}

impl Scanner {
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    /// Scanner over a single directory
    pub fn dir(dir: impl Into<PathBuf>) -> Self {
        Self { dirs: vec![dir.into()] }
    }

    /// Items whose frontmatter satisfies `predicate`
    pub fn scan(&self, predicate: &Predicate) -> Vec<Item> {
        debug!(?predicate, dirs = ?self.dirs, "Scanner::scan: called");
        let items: Vec<Item> = self
            .dirs
            .iter()
            .flat_map(|dir| markdown_files(dir))
            .filter_map(|path| Item::load(&path))
            .filter(|item| predicate.matches(&item.frontmatter))
            .collect();
        debug!(count = items.len(), "Scanner::scan: matched");
        items
    }

    /// Identifiers of matching items, sorted
    pub fn scan_ids(&self, predicate: &Predicate) -> Vec<String> {
        let mut ids: Vec<String> = self.scan(predicate).into_iter().map(|item| item.id).collect();
        ids.sort();
        ids
    }
}
