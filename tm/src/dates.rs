//! Date normalization and week arithmetic
//!
//! Two parsers live here on purpose with different contracts:
//! [`normalize_date`] never fails and only reformats what it recognizes,
//! while [`parse_strict`] accepts canonical `YYYY-MM-DD` only.

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::TaskmdError;

/// Canonical date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static US_LONG_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid regex"));
static US_SHORT_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").expect("valid regex"));
static CANONICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Normalize a raw frontmatter date value to `YYYY-MM-DD`.
///
/// - `M/D/YYYY`, `MM/DD/YYYY` and `M/D/YY` are read month-first and must be
///   real calendar dates.
/// - Three dash-separated numeric parts are taken as year-month-day and the
///   month and day are zero-padded, without range checks.
/// - Anything else comes back trimmed but otherwise untouched.
pub fn normalize_date(raw: &str) -> String {
    let value = raw.trim();

    if value.contains('/')
        && let Some(date) = parse_us_date(value)
    {
        return date.format(DATE_FORMAT).to_string();
    }

    if value.contains('-') {
        let parts: Vec<&str> = value.split('-').collect();
        if parts.len() == 3 && parts.iter().all(|p| is_digits(p)) {
            return format!("{}-{:0>2}-{:0>2}", parts[0], parts[1], parts[2]);
        }
    }

    debug!(%value, "normalize_date: left unchanged");
    value.to_string()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_us_date(value: &str) -> Option<NaiveDate> {
    if let Some(caps) = US_LONG_YEAR.captures(value) {
        let (month, day, year) = (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    let caps = US_SHORT_YEAR.captures(value)?;
    let (month, day, short): (u32, u32, i32) = (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?);
    // 69-99 are the 1900s, 00-68 the 2000s
    let year = if short >= 69 { 1900 + short } else { 2000 + short };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a canonical `YYYY-MM-DD` date; anything else is `None`
pub fn parse_strict(value: &str) -> Option<NaiveDate> {
    if !CANONICAL.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parse a user-supplied reference date
pub fn parse_reference(value: &str) -> Result<NaiveDate, TaskmdError> {
    parse_strict(value.trim()).ok_or_else(|| TaskmdError::InvalidDate {
        value: value.to_string(),
    })
}

/// Format as `YYYY-MM-DD`
pub fn iso(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format as `Monday, October 7`
pub fn day_header(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Format as `October 7`
pub fn month_day(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

/// Every date from `start` through `end`; empty when `start > end`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Current and next Monday-start week around a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekDates {
    pub today: NaiveDate,
    pub tomorrow: NaiveDate,
    pub this_week_start: NaiveDate,
    pub this_week_end: NaiveDate,
    pub next_week_start: NaiveDate,
    pub next_week_end: NaiveDate,
}

impl WeekDates {
    pub fn for_date(today: NaiveDate) -> Self {
        let this_week_start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let this_week_end = this_week_start + Duration::days(6);
        let next_week_start = this_week_end + Duration::days(1);

        Self {
            today,
            tomorrow: today + Duration::days(1),
            this_week_start,
            this_week_end,
            next_week_start,
            next_week_end: next_week_start + Duration::days(6),
        }
    }

    /// Days left in the current week after today
    pub fn remaining_this_week(&self) -> Vec<NaiveDate> {
        days_between(self.tomorrow, self.this_week_end)
    }

    pub fn next_week(&self) -> Vec<NaiveDate> {
        days_between(self.next_week_start, self.next_week_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_normalize_table() {
        assert_eq!(normalize_date("10/5/2025"), "2025-10-05");
        assert_eq!(normalize_date("09/05/2025"), "2025-09-05");
        assert_eq!(normalize_date("9/15/25"), "2025-09-15");
        assert_eq!(normalize_date("2025-1-3"), "2025-01-03");
        assert_eq!(normalize_date("2025-10-05"), "2025-10-05");
        assert_eq!(normalize_date("not-a-date"), "not-a-date");
        assert_eq!(normalize_date("someday"), "someday");
    }

    #[test]
    fn test_normalize_two_digit_year_pivot() {
        assert_eq!(normalize_date("1/2/68"), "2068-01-02");
        assert_eq!(normalize_date("1/2/69"), "1969-01-02");
    }

    #[test]
    fn test_normalize_invalid_us_date_passes_through() {
        assert_eq!(normalize_date("13/45/2025"), "13/45/2025");
        assert_eq!(normalize_date("2/30/2025"), "2/30/2025");
    }

    #[test]
    fn test_normalize_dash_form_is_not_range_checked() {
        assert_eq!(normalize_date("2025-13-1"), "2025-13-01");
        assert_eq!(normalize_date("2025-10-5-1"), "2025-10-5-1");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_date("  2025-10-05 "), "2025-10-05");
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(parse_strict("2025-10-09"), Some(date("2025-10-09")));
        assert_eq!(parse_strict("2025-1-3"), None);
        assert_eq!(parse_strict("2025-13-01"), None);
        assert_eq!(parse_strict("invalid"), None);
        assert_eq!(parse_strict("10/5/2025"), None);
    }

    #[test]
    fn test_week_dates_midweek() {
        // Friday
        let weeks = WeekDates::for_date(date("2025-10-10"));
        assert_eq!(weeks.tomorrow, date("2025-10-11"));
        assert_eq!(weeks.this_week_start, date("2025-10-06"));
        assert_eq!(weeks.this_week_end, date("2025-10-12"));
        assert_eq!(weeks.next_week_start, date("2025-10-13"));
        assert_eq!(weeks.next_week_end, date("2025-10-19"));
        assert_eq!(weeks.remaining_this_week().len(), 2);
        assert_eq!(weeks.next_week().len(), 7);
    }

    #[test]
    fn test_week_dates_sunday_has_no_remaining_days() {
        let weeks = WeekDates::for_date(date("2025-10-12"));
        assert_eq!(weeks.this_week_start, date("2025-10-06"));
        assert!(weeks.remaining_this_week().is_empty());
        assert_eq!(weeks.next_week_start, date("2025-10-13"));
    }

    #[test]
    fn test_headers() {
        assert_eq!(day_header(date("2025-10-06")), "Monday, October 6");
        assert_eq!(month_day(date("2025-10-12")), "October 12");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "[0-9/a-z -]{0,14}") {
            let once = normalize_date(&s);
            prop_assert_eq!(normalize_date(&once), once);
        }

        #[test]
        fn prop_canonical_dates_unchanged(y in 1970i32..2100, m in 1u32..=12, d in 1u32..=28) {
            let s = format!("{:04}-{:02}-{:02}", y, m, d);
            prop_assert_eq!(normalize_date(&s), s);
        }
    }
}
