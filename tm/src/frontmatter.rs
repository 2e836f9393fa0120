//! Line-oriented frontmatter handling
//!
//! Frontmatter is the text between a leading `---` and the next `---`.
//! It is never parsed as YAML: fields are found by matching individual
//! lines, and anything not matched is carried through byte-for-byte.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::dates::normalize_date;

/// Frontmatter delimiter
pub const DELIMITER: &str = "---";

/// Fields whose values are normalized to `YYYY-MM-DD`
pub const DATE_FIELDS: [&str; 4] = ["due", "completed", "created", "updated"];

static DATE_FIELD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^({}):\s*(.+)$", DATE_FIELDS.join("|"))).expect("valid regex"));

/// A file split into its frontmatter and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text between the delimiters, including surrounding newlines
    pub frontmatter: &'a str,
    /// Everything after the closing delimiter
    pub body: &'a str,
}

/// Split content into frontmatter and body.
///
/// Returns `None` when the content does not start with the delimiter or
/// has no closing delimiter.
pub fn split(content: &str) -> Option<Split<'_>> {
    let rest = content.strip_prefix(DELIMITER)?;
    let end = rest.find(DELIMITER)?;
    Some(Split {
        frontmatter: &rest[..end],
        body: &rest[end + DELIMITER.len()..],
    })
}

/// Result of a rewrite pass over one file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub changed: bool,
}

impl Rewrite {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            changed: false,
        }
    }
}

/// Normalize every recognized date field in the frontmatter of `content`
pub fn rewrite_dates(content: &str) -> Rewrite {
    let Some(parts) = split(content) else {
        debug!("rewrite_dates: no frontmatter");
        return Rewrite::unchanged(content);
    };

    let mut changed = false;
    let lines: Vec<String> = parts
        .frontmatter
        .split('\n')
        .map(|line| match rewrite_line(line) {
            Some(new_line) => {
                changed = true;
                new_line
            }
            None => line.to_string(),
        })
        .collect();

    if !changed {
        return Rewrite::unchanged(content);
    }

    Rewrite {
        content: format!("{DELIMITER}{}{DELIMITER}{}", lines.join("\n"), parts.body),
        changed,
    }
}

/// The replacement for a date field line, if normalization alters it
fn rewrite_line(line: &str) -> Option<String> {
    let caps = DATE_FIELD_LINE.captures(line)?;
    let (field, value) = (&caps[1], &caps[2]);
    if value.trim().is_empty() {
        return None;
    }

    let normalized = normalize_date(value);
    if normalized == value {
        return None;
    }

    debug!(field, from = value, to = %normalized, "rewrite_line: normalized");
    Some(format!("{}: {}", field, normalized))
}

/// Read-only view over a frontmatter block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    raw: String,
}

impl Frontmatter {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Extract the frontmatter of `content`, if it has any
    pub fn from_content(content: &str) -> Option<Self> {
        split(content).map(|parts| Self::new(parts.frontmatter))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw.lines()
    }

    /// A line starts with `key:`
    pub fn has_field(&self, key: &str) -> bool {
        self.field_line(key).is_some()
    }

    /// A line reads exactly `key: value`
    pub fn field_equals(&self, key: &str, value: &str) -> bool {
        let expected = format!("{}: {}", key, value);
        self.lines().any(|line| line == expected)
    }

    /// Trimmed value of the first `key:` line
    pub fn field_value(&self, key: &str) -> Option<&str> {
        self.field_line(key).map(|rest| rest.trim())
    }

    fn field_line(&self, key: &str) -> Option<&str> {
        self.lines()
            .find_map(|line| line.strip_prefix(key).and_then(|rest| rest.strip_prefix(':')))
    }

    /// The `tags:` line and the `  - ` list lines directly below it
    pub fn tag_lines(&self) -> Vec<&str> {
        let mut lines = self.lines().skip_while(|line| !line.starts_with("tags:"));
        let Some(first) = lines.next() else {
            return Vec::new();
        };

        let mut block = vec![first];
        block.extend(lines.take_while(|line| line.starts_with("  - ")));
        block
    }

    /// `tag` appears anywhere in the tags block, inline or list form
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_lines().iter().any(|line| line.contains(tag))
    }
}
