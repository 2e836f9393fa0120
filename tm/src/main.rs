//! taskmd - task digests for a Markdown knowledge base
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use taskmd::cli::{Cli, Command, OutputFormat, get_log_path};
use taskmd::config::Config;
use taskmd::dates::{self, WeekDates};
use taskmd::digest::{DigestBuilder, DigestSummary};
use taskmd::{ArchiveReport, FsMover, ImportReport, NormalizeReport};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn reference_date(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(value) => Ok(dates::parse_reference(value)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn main() -> Result<()> {
    let Cli {
        config: config_path,
        log_level,
        date,
        command,
    } = Cli::parse();

    let config_log_level = Config::load_log_level(config_path.as_ref());
    setup_logging(log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let load_config = || Config::load(config_path.as_ref()).context("Failed to load configuration");
    let reference = || reference_date(date.as_deref());

    debug!(?command, "main: dispatching command");
    match command {
        Command::Setup {
            root,
            link_format,
            no_research,
            output,
        } => {
            let mut config = Config::new(root);
            config.link_format = link_format;
            config.research_integration = !no_research;
            cmd_setup(&config, output.or_else(|| config_path.clone()))?;
        }
        Command::Normalize => {
            let config = load_config()?;
            let report = taskmd::normalize_corpus(&config.task_dirs());
            print_normalize(&report);
        }
        Command::Archive => {
            let config = load_config()?;
            let report = taskmd::archive_completed(&config, &FsMover);
            print_archive(&report);
        }
        Command::Import => {
            let config = load_config()?;
            let report = taskmd::clean_imports(&config, &FsMover);
            print_import(&config, &report);
        }
        Command::Weeks { format } => {
            let weeks = WeekDates::for_date(reference()?);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&weeks)?),
                OutputFormat::Text => print_weeks(&weeks),
            }
        }
        Command::Digest => {
            let config = load_config()?;
            let reference = reference()?;
            info!(root = ?config.root(), %reference, "Building digests");
            let summary = DigestBuilder::new(&config, reference).write_all()?;
            print_digests(&WeekDates::for_date(reference), &summary);
        }
        Command::Generate { format } => {
            let config = load_config()?;
            let report = taskmd::generate(&config, reference()?, &FsMover)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => {
                    println!("{}\n", "=== Generating Daily Task Files ===".bold());
                    print_normalize(&report.normalize);
                    println!();
                    print_weeks(&report.weeks);
                    println!();
                    print_archive(&report.archive);
                    print_digests(&report.weeks, &report.digests);
                    println!("\n{}", "=== Done! ===".bold());
                }
            }
        }
    }

    Ok(())
}

fn cmd_setup(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let path = match output {
        Some(path) => path,
        None => Config::user_config_path().ok_or_else(|| eyre::eyre!("No user config directory available"))?,
    };
    config.save(&path)?;
    println!("{} Wrote config: {}", "✓".green(), path.display().to_string().cyan());
    println!("  Tasks root: {}", config.root().display());
    Ok(())
}

fn print_normalize(report: &NormalizeReport) {
    if report.modified.is_empty() {
        println!("No files needed date normalization.");
        return;
    }
    println!("Normalized dates in {} file(s):\n", report.modified.len());
    for path in &report.modified {
        println!("  - {}", path.display());
    }
}

fn print_weeks(weeks: &WeekDates) {
    println!(
        "Today: {} ({})",
        dates::day_header(weeks.today).cyan(),
        dates::iso(weeks.today)
    );
    println!();
    println!("{}", "This Week:".bold());
    println!("  Monday:    {}", dates::iso(weeks.this_week_start));
    println!("  Sunday:    {}", dates::iso(weeks.this_week_end));
    println!("  Tomorrow:  {}", dates::iso(weeks.tomorrow));
    println!();
    println!("{}", "Next Week:".bold());
    println!("  Monday:    {}", dates::iso(weeks.next_week_start));
    println!("  Sunday:    {}", dates::iso(weeks.next_week_end));
}

fn print_archive(report: &ArchiveReport) {
    if !report.archived.is_empty() {
        println!("Archived {} completed task(s):", report.archived.len().to_string().green());
        for stem in &report.archived {
            println!("  - {}", stem);
        }
    }
    if !report.skipped.is_empty() {
        println!("Skipped {} recurring task(s):", report.skipped.len());
        for stem in &report.skipped {
            println!("  - {} {}", stem, "(has recurrence field, stays in tasks)".dimmed());
        }
    }
    if report.archived.is_empty() && report.skipped.is_empty() {
        println!("No completed tasks to archive.");
    }
}

fn print_import(config: &Config, report: &ImportReport) {
    if !report.import_dir_exists {
        println!("Import folder does not exist.");
        return;
    }

    if report.total_moved() > 0 {
        println!("Moved {} file(s) from import:\n", report.total_moved());
        for (folder, stems) in report.groups() {
            println!("{}/ ({}):", config.folder_name(folder).cyan(), stems.len());
            for stem in stems {
                println!("  - {}", config.link(stem, Some(folder)));
            }
            println!();
        }
    }

    if !report.skipped.is_empty() {
        println!("Skipped {} file(s) (no type field):", report.skipped.len().to_string().yellow());
        for name in &report.skipped {
            println!("  - {}", name);
        }
    }

    if report.total_moved() == 0 && report.skipped.is_empty() {
        println!("No files in import folder.");
    }
}

fn print_digests(weeks: &WeekDates, summary: &DigestSummary) {
    println!("\n{} today.md", "✓".green());
    println!("  - {} overdue task(s)", summary.today.overdue);
    println!("  - {} task(s) due today", summary.today.due_today);
    println!("  - {} research task(s)", summary.today.research);
    println!("  - {} in-progress idea(s)", summary.today.ideas);

    println!("{} this-week.md", "✓".green());
    if weeks.remaining_this_week().is_empty() {
        println!("  - No days remaining this week");
    } else {
        println!(
            "  - {} task(s) across {} day(s)",
            summary.this_week.tasks, summary.this_week.days
        );
    }

    println!("{} next-week.md", "✓".green());
    println!(
        "  - {} task(s) across {} day(s)",
        summary.next_week.tasks, summary.next_week.days
    );
}
