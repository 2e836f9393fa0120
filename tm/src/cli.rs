//! CLI argument parsing for taskmd

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use crate::link::LinkFormat;

#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about = "Normalize task dates and generate daily digests", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Reference date as YYYY-MM-DD (default: today)
    #[arg(short, long, global = true)]
    pub date: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a configuration file
    Setup {
        /// Root directory of the knowledge base
        #[arg(short, long, required = true)]
        root: PathBuf,

        /// Link style used in digests (obsidian, markdown)
        #[arg(long, default_value = "obsidian")]
        link_format: LinkFormat,

        /// Leave the Research section out of today.md
        #[arg(long)]
        no_research: bool,

        /// Where to write the config (default: user config dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize date fields in task, idea, bug and import files
    Normalize,

    /// Move completed one-off tasks to the completed folder
    Archive,

    /// Move files out of the import folder by their type field
    Import,

    /// Show this week's and next week's dates
    Weeks {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Regenerate today.md, this-week.md and next-week.md
    Digest,

    /// Normalize, archive, then regenerate all digests
    Generate {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for report commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        debug!(?self, "OutputFormat::fmt: called");
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Log file location
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskmd")
        .join("logs")
        .join("taskmd.log")
}
