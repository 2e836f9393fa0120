//! Task classification from frontmatter
//!
//! Classifications are derived on every scan and never written back.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::parse_strict;
use crate::frontmatter::Frontmatter;
use crate::scanner::Predicate;

/// Tags that mark an item as belonging to the research workflow
pub const RESEARCH_TAGS: [&str; 2] = ["research-review", "research-summary-needed"];

/// Derived categories for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Classification {
    /// `recurrence:` is present, whatever its value
    pub is_recurring: bool,
    /// `completed:` is present, even when empty
    pub is_completed: bool,
    /// Tagged with one of [`RESEARCH_TAGS`]
    pub is_research: bool,
}

impl Classification {
    pub fn of(frontmatter: &Frontmatter) -> Self {
        Self {
            is_recurring: frontmatter.has_field("recurrence"),
            is_completed: frontmatter.has_field("completed"),
            is_research: is_research(frontmatter),
        }
    }

    /// Completed one-off items move to the archive; recurring ones never do
    pub fn archive_eligible(&self) -> bool {
        self.is_completed && !self.is_recurring
    }
}

/// Matches frontmatter carrying any of [`RESEARCH_TAGS`]
pub fn research_predicate() -> Predicate {
    Predicate::Any(RESEARCH_TAGS.iter().map(|tag| Predicate::has_tag(tag)).collect())
}

pub fn is_research(frontmatter: &Frontmatter) -> bool {
    research_predicate().matches(frontmatter)
}

/// Due date when it parses strictly as `YYYY-MM-DD`
pub fn due_date(frontmatter: &Frontmatter) -> Option<NaiveDate> {
    frontmatter.field_value("due").and_then(parse_strict)
}

/// Due strictly before `reference`; malformed due dates never count
pub fn is_overdue(frontmatter: &Frontmatter, reference: NaiveDate) -> bool {
    due_date(frontmatter).is_some_and(|due| due < reference)
}
