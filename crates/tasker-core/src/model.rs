//! The task record: the sole domain entity, plus its label encoding.
//!
//! Storage and the wire both carry `status` / `category` as human-readable
//! labels, never ordinals. Decoding is total: an unrecognized label repairs
//! to the default variant instead of failing the load, so a malformed cache
//! blob or seed file degrades gracefully rather than aborting startup.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three lifecycle states of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Complete,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Complete];

    /// The wire/storage label for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "To-do",
            Self::InProgress => "In-Progress",
            Self::Complete => "Complete",
        }
    }

    /// Total decoding from a stored label. Unknown labels repair to `Todo`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "In-Progress" => Self::InProgress,
            "Complete" => Self::Complete,
            _ => Self::Todo,
        }
    }
}

/// The four task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Urgent,
    Other,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Personal, Self::Work, Self::Urgent, Self::Other];

    /// The wire/storage label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Urgent => "Urgent",
            Self::Other => "Other",
        }
    }

    /// Total decoding from a stored label. Unknown labels repair to `Personal`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Work" => Self::Work,
            "Urgent" => Self::Urgent,
            "Other" => Self::Other,
            _ => Self::Personal,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.label().to_owned()
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::from_label(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.label().to_owned()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when strictly parsing an enum value from text.
///
/// Only the CLI uses strict parsing, to reject bad flag values; every
/// storage boundary goes through the lenient `from_label` path instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "to-do" | "todo" => Ok(Self::Todo),
            "in-progress" | "inprogress" | "doing" => Ok(Self::InProgress),
            "complete" | "done" => Ok(Self::Complete),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "urgent" => Ok(Self::Urgent),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError {
                expected: "category",
                got: s.to_string(),
            }),
        }
    }
}

/// A single task record.
///
/// Field spellings on the wire (`dueDate`, `Tags`) match the reference
/// backend; `due_date` is a fixed-width `YYYY-MM-DD` string, so lexical
/// comparison is date comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned, unique, never reused. Defaults to `0` on the wire
    /// so creation bodies may omit it; the store overwrites it anyway.
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub category: Category,
    #[serde(rename = "dueDate", default)]
    pub due_date: String,
    #[serde(rename = "Tags", default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub archived: bool,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            description: String::new(),
            status: Status::Todo,
            category: Category::Personal,
            due_date: String::new(),
            tags: Vec::new(),
            archived: false,
        }
    }
}
