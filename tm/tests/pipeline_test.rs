//! End-to-end tests for the generate pipeline
//!
//! These run every pass against a small on-disk knowledge base.

use std::fs;

use chrono::NaiveDate;
use taskmd::{Config, FsMover, generate};
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn knowledge_base() -> (TempDir, Config) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = Config::new(temp.path());
    fs::create_dir_all(config.folder("tasks")).expect("Failed to create tasks dir");
    (temp, config)
}

#[test]
fn test_generate_end_to_end() {
    let (temp, config) = knowledge_base();
    let tasks = config.folder("tasks");
    fs::write(tasks.join("file1.md"), "---\ndue: 10/5/2025\n---\nCall the bank\n").unwrap();
    fs::write(
        tasks.join("file2.md"),
        "---\ndue: 2025-10-05\ntags:\n  - research-review\n---\nRead the paper\n",
    )
    .unwrap();
    fs::write(tasks.join("file3.md"), "---\ncompleted:\n---\nDone already\n").unwrap();

    let report = generate(&config, date("2025-10-06"), &FsMover).expect("generate failed");

    // Normalization
    assert_eq!(report.normalize.modified, vec![tasks.join("file1.md")]);
    assert_eq!(
        fs::read_to_string(tasks.join("file1.md")).unwrap(),
        "---\ndue: 2025-10-05\n---\nCall the bank\n"
    );

    // Archival
    assert_eq!(report.archive.archived, vec!["file3"]);
    assert!(config.folder("completed").join("file3.md").exists());
    assert!(!tasks.join("file3.md").exists());

    // Digests
    let today = fs::read_to_string(temp.path().join("today.md")).unwrap();
    assert_eq!(
        today,
        "---\ndate: 2025-10-06\n---\n# Today - Monday, October 6\n\n\
         ## Overdue\n- [ ] [[file1]] (due: 2025-10-05)\n\n\
         ## Due Today\n\n\
         ## Research\n- [ ] [[file2]]\n"
    );
    assert!(!today.contains("file3"));
    assert_eq!(report.digests.today.overdue, 1);
    assert_eq!(report.digests.today.research, 1);
    assert_eq!(report.weeks.this_week_end, date("2025-10-12"));
}

#[test]
fn test_generate_is_idempotent() {
    let (temp, config) = knowledge_base();
    let tasks = config.folder("tasks");
    fs::write(tasks.join("a.md"), "---\ndue: 10/8/25\n---\n").unwrap();
    fs::write(tasks.join("b.md"), "---\ndue: 2025-10-14\nrecurrence: weekly\ncompleted: 2025-10-01\n---\n").unwrap();

    let first = generate(&config, date("2025-10-06"), &FsMover).unwrap();
    let digests_first: Vec<String> = ["today.md", "this-week.md", "next-week.md"]
        .iter()
        .map(|name| fs::read_to_string(temp.path().join(name)).unwrap())
        .collect();

    let second = generate(&config, date("2025-10-06"), &FsMover).unwrap();
    let digests_second: Vec<String> = ["today.md", "this-week.md", "next-week.md"]
        .iter()
        .map(|name| fs::read_to_string(temp.path().join(name)).unwrap())
        .collect();

    assert_eq!(first.normalize.modified.len(), 1);
    assert!(second.normalize.modified.is_empty());
    assert_eq!(first.archive.skipped, vec!["b"]);
    assert_eq!(digests_first, digests_second);
    assert!(digests_first[1].contains("## Wednesday, October 8\n- [ ] [[a]]\n"));
    assert!(digests_first[2].contains("## Tuesday, October 14\n- [ ] [[b]]\n"));
}

#[test]
fn test_generate_on_sunday() {
    let (temp, config) = knowledge_base();
    fs::write(config.folder("tasks").join("sun.md"), "---\ndue: 2025-10-12\n---\n").unwrap();

    let report = generate(&config, date("2025-10-12"), &FsMover).unwrap();

    let this_week = fs::read_to_string(temp.path().join("this-week.md")).unwrap();
    assert_eq!(
        this_week,
        "---\nweek_start: 2025-10-06\nweek_end: 2025-10-12\n---\n\
         # This Week - Week ending October 12\n\nNo tasks remaining this week.\n"
    );
    assert_eq!(report.digests.today.due_today, 1);
    assert_eq!(report.digests.this_week.days, 0);
}
