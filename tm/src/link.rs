//! Link formatting for digest and report entries

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TaskmdError;

/// How item references are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkFormat {
    /// `[[stem]]`
    #[default]
    Obsidian,
    /// `[stem](dir/stem.md)`
    Markdown,
}

impl LinkFormat {
    /// Render a link to `stem`, optionally inside directory `dir`
    pub fn format(&self, stem: &str, dir: Option<&str>) -> String {
        match (self, dir) {
            (Self::Obsidian, _) => format!("[[{}]]", stem),
            (Self::Markdown, Some(dir)) => format!("[{}]({}/{}.md)", stem, dir, stem),
            (Self::Markdown, None) => format!("[{}]({}.md)", stem, stem),
        }
    }
}

impl std::str::FromStr for LinkFormat {
    type Err = TaskmdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "LinkFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "obsidian" | "wiki" => Ok(Self::Obsidian),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(TaskmdError::UnknownLinkFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for LinkFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Obsidian => write!(f, "obsidian"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}
