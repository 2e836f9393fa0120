//! Today / this-week / next-week digest documents
//!
//! Every digest is rebuilt from a fresh scan and replaces the previous
//! file wholesale.

use chrono::NaiveDate;
use eyre::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::classify::{is_overdue, is_research, research_predicate};
use crate::config::Config;
use crate::dates::{WeekDates, day_header, iso, month_day};
use crate::fsio::write_atomic;
use crate::scanner::{Item, Predicate, Scanner};

/// Which digest a document is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestKind {
    Today,
    ThisWeek,
    NextWeek,
}

impl DigestKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Today => "today.md",
            Self::ThisWeek => "this-week.md",
            Self::NextWeek => "next-week.md",
        }
    }
}

/// A rendered digest document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub kind: DigestKind,
    pub content: String,
}

impl Digest {
    /// Overwrite `<root>/<file_name>` with this document
    pub fn write(&self, root: &Path) -> Result<PathBuf> {
        let path = root.join(self.kind.file_name());
        write_atomic(&path, &self.content)?;
        Ok(path)
    }
}

/// Counts reported after building the today digest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodaySummary {
    pub overdue: usize,
    pub due_today: usize,
    pub research: usize,
    pub ideas: usize,
}

/// Counts reported after building a week digest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeekSummary {
    pub tasks: usize,
    pub days: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigestSummary {
    pub today: TodaySummary,
    pub this_week: WeekSummary,
    pub next_week: WeekSummary,
}

/// Builds digests for one reference date against one configuration
pub struct DigestBuilder<'a> {
    config: &'a Config,
    weeks: WeekDates,
    tasks: Scanner,
    ideas: Scanner,
}

impl<'a> DigestBuilder<'a> {
    pub fn new(config: &'a Config, reference: NaiveDate) -> Self {
        Self {
            config,
            weeks: WeekDates::for_date(reference),
            tasks: Scanner::dir(config.folder("tasks")),
            ideas: Scanner::dir(config.folder("ideas")),
        }
    }

    pub fn weeks(&self) -> &WeekDates {
        &self.weeks
    }

    /// Non-research tasks due exactly on `day`
    pub fn tasks_due_on(&self, day: NaiveDate) -> Vec<String> {
        let items = self.tasks.scan(&Predicate::field_equals("due", &iso(day)));
        sorted_ids(items.into_iter().filter(|item| !is_research(&item.frontmatter)))
    }

    /// Non-research tasks due before the reference date, with their raw due value
    pub fn overdue(&self) -> Vec<(String, String)> {
        let mut overdue: Vec<(String, String)> = self
            .tasks
            .scan(&Predicate::has_field("due"))
            .into_iter()
            .filter(|item| !is_research(&item.frontmatter) && is_overdue(&item.frontmatter, self.weeks.today))
            .map(|item| {
                let due = item.frontmatter.field_value("due").unwrap_or_default().to_string();
                (item.id, due)
            })
            .collect();
        overdue.sort();
        overdue
    }

    /// Research tasks that carry a due field, whatever its date
    pub fn research(&self) -> Vec<String> {
        self.tasks
            .scan_ids(&Predicate::All(vec![Predicate::has_field("due"), research_predicate()]))
    }

    pub fn in_progress_ideas(&self) -> Vec<String> {
        self.ideas.scan_ids(&Predicate::field_equals("status", "in progress"))
    }

    pub fn today(&self) -> (Digest, TodaySummary) {
        let today = self.weeks.today;
        let overdue = self.overdue();
        let due_today = self.tasks_due_on(today);
        let ideas = self.in_progress_ideas();
        let research = if self.config.research_integration {
            self.research()
        } else {
            Vec::new()
        };

        let mut out = format!("---\ndate: {}\n---\n", iso(today));
        out.push_str(&format!("# Today - {}\n\n", day_header(today)));

        if !overdue.is_empty() {
            out.push_str("## Overdue\n");
            for (id, due) in &overdue {
                out.push_str(&format!("- [ ] {} (due: {})\n", self.config.link(id, Some("tasks")), due));
            }
            out.push('\n');
        }

        out.push_str("## Due Today\n");
        for id in &due_today {
            out.push_str(&format!("- [ ] {}\n", self.config.link(id, Some("tasks"))));
        }
        out.push('\n');

        if !ideas.is_empty() {
            out.push_str("## In Progress Ideas\n");
            for id in &ideas {
                out.push_str(&format!("- {}\n", self.config.link(id, Some("ideas"))));
            }
            out.push('\n');
        }

        if !research.is_empty() {
            out.push_str("## Research\n");
            for id in &research {
                out.push_str(&format!("- [ ] {}\n", self.config.link(id, Some("tasks"))));
            }
        }

        let summary = TodaySummary {
            overdue: overdue.len(),
            due_today: due_today.len(),
            research: research.len(),
            ideas: ideas.len(),
        };
        debug!(?summary, "DigestBuilder::today: built");
        (
            Digest {
                kind: DigestKind::Today,
                content: out,
            },
            summary,
        )
    }

    pub fn this_week(&self) -> (Digest, WeekSummary) {
        let weeks = &self.weeks;
        let mut out = week_header(weeks.this_week_start, weeks.this_week_end);
        out.push_str(&format!("# This Week - Week ending {}\n\n", month_day(weeks.this_week_end)));

        let days = weeks.remaining_this_week();
        let summary = if days.is_empty() {
            debug!("DigestBuilder::this_week: no days remaining");
            out.push_str("No tasks remaining this week.\n");
            WeekSummary::default()
        } else {
            self.day_sections(&mut out, &days)
        };

        (
            Digest {
                kind: DigestKind::ThisWeek,
                content: out,
            },
            summary,
        )
    }

    pub fn next_week(&self) -> (Digest, WeekSummary) {
        let weeks = &self.weeks;
        let mut out = week_header(weeks.next_week_start, weeks.next_week_end);
        out.push_str(&format!("# Next Week - Week of {}\n\n", month_day(weeks.next_week_start)));

        let summary = self.day_sections(&mut out, &weeks.next_week());
        (
            Digest {
                kind: DigestKind::NextWeek,
                content: out,
            },
            summary,
        )
    }

    fn day_sections(&self, out: &mut String, days: &[NaiveDate]) -> WeekSummary {
        let mut tasks = 0;
        for day in days {
            let due = self.tasks_due_on(*day);
            if due.is_empty() {
                continue;
            }
            out.push_str(&format!("## {}\n", day_header(*day)));
            for id in &due {
                out.push_str(&format!("- [ ] {}\n", self.config.link(id, Some("tasks"))));
            }
            out.push('\n');
            tasks += due.len();
        }
        WeekSummary { tasks, days: days.len() }
    }

    /// Build all three digests
    pub fn build(&self) -> (Vec<Digest>, DigestSummary) {
        let (today, today_summary) = self.today();
        let (this_week, this_week_summary) = self.this_week();
        let (next_week, next_week_summary) = self.next_week();
        (
            vec![today, this_week, next_week],
            DigestSummary {
                today: today_summary,
                this_week: this_week_summary,
                next_week: next_week_summary,
            },
        )
    }

    /// Build all three digests and overwrite them under the tasks root
    pub fn write_all(&self) -> Result<DigestSummary> {
        let (digests, summary) = self.build();
        for digest in &digests {
            let path = digest.write(self.config.root())?;
            info!(?path, "Wrote digest");
        }
        Ok(summary)
    }
}

fn week_header(start: NaiveDate, end: NaiveDate) -> String {
    format!("---\nweek_start: {}\nweek_end: {}\n---\n", iso(start), iso(end))
}

fn sorted_ids(items: impl Iterator<Item = Item>) -> Vec<String> {
    let mut ids: Vec<String> = items.map(|item| item.id).collect();
    ids.sort();
    ids
}
