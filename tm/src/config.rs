//! Configuration for taskmd

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::TaskmdError;
use crate::link::LinkFormat;

/// Logical folders that may hold items picked up by the normalization pass
pub const TASK_FOLDERS: [&str; 4] = ["tasks", "ideas", "bugs", "import"];

/// Main taskmd configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Filesystem locations
    pub paths: PathsConfig,

    /// Logical folder name -> directory name under the tasks root
    #[serde(default)]
    pub folders: BTreeMap<String, String>,

    /// How links are rendered in digests and reports
    #[serde(default)]
    pub link_format: LinkFormat,

    /// List research items in the today digest
    #[serde(default = "default_research_integration")]
    pub research_integration: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PathsConfig {
    /// Root directory of the knowledge base; digests are written here
    pub tasks_root: PathBuf,
}

fn default_research_integration() -> bool {
    true
}

/// Default folder mapping written by `tm setup`
pub fn default_folders() -> BTreeMap<String, String> {
    ["tasks", "ideas", "bugs", "import", "completed", "templates", "memories"]
        .into_iter()
        .map(|name| (name.to_string(), name.to_string()))
        .collect()
}

impl Config {
    /// Build a config rooted at `tasks_root` with the default folder layout
    pub fn new(tasks_root: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathsConfig {
                tasks_root: tasks_root.into(),
            },
            folders: default_folders(),
            link_format: LinkFormat::default(),
            research_integration: default_research_integration(),
            log_level: None,
        }
    }

    /// Load configuration with fallback chain; a missing config is fatal
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(TaskmdError::ConfigNotFound {
                    searched: vec![path.clone()],
                }
                .into());
            }
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let candidates = Self::default_paths();
        for path in &candidates {
            if path.exists() {
                return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
            }
        }

        Err(TaskmdError::ConfigNotFound { searched: candidates }.into())
    }

    /// Read just the log level, for logging setup before the full load
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let path = match config_path {
            Some(p) => p.clone(),
            None => Self::default_paths().into_iter().find(|p| p.exists())?,
        };
        let content = fs::read_to_string(path).ok()?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content).ok()?;
        value.get("log-level")?.as_str().map(str::to_string)
    }

    /// Locations searched when no explicit path is given, in priority order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".taskmd.yml")];
        if let Some(path) = Self::user_config_path() {
            paths.push(path);
        }
        paths
    }

    /// `~/.config/taskmd/taskmd.yml` (platform equivalent)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("taskmd").join("taskmd.yml"))
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Save config to file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).context(format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.paths.tasks_root
    }

    /// Directory name a logical folder maps to; unmapped names map to themselves
    pub fn folder_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.folders.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Absolute path of a logical folder
    pub fn folder(&self, name: &str) -> PathBuf {
        let path = self.root().join(self.folder_name(name));
        debug!(name, ?path, "Config::folder: resolved");
        path
    }

    /// Directories walked by the normalization pass
    pub fn task_dirs(&self) -> Vec<PathBuf> {
        TASK_FOLDERS.iter().map(|name| self.folder(name)).collect()
    }

    /// Render a link to an item that lives in logical folder `folder`
    pub fn link(&self, stem: &str, folder: Option<&str>) -> String {
        self.link_format.format(stem, folder.map(|f| self.folder_name(f)))
    }
}
