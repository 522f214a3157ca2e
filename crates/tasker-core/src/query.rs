//! Stateless filter and view functions over a task collection.
//!
//! Every function here is pure: it takes a snapshot slice, returns owned
//! matches, and never touches engine state or persistence. Filters default
//! to the active (non-archived) subset; pass `include_archived = true` to
//! widen the scope.
//!
//! Two "upcoming" variants exist on purpose. The client view is an open
//! lexical range (`due_date >= today`); the server view is a true-date
//! seven-day window, because it must handle cross-month arithmetic.

use crate::model::{Category, Status, Task};
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Today's date in the fixed `YYYY-MM-DD` encoding used by `due_date`.
#[must_use]
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn scoped(tasks: &[Task], include_archived: bool) -> impl Iterator<Item = &Task> {
    tasks
        .iter()
        .filter(move |t| include_archived || !t.archived)
}

/// All non-archived tasks.
#[must_use]
pub fn active(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|t| !t.archived).cloned().collect()
}

/// All archived tasks.
#[must_use]
pub fn archived(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|t| t.archived).cloned().collect()
}

/// Exact category match.
#[must_use]
pub fn by_category(tasks: &[Task], category: Category, include_archived: bool) -> Vec<Task> {
    scoped(tasks, include_archived)
        .filter(|t| t.category == category)
        .cloned()
        .collect()
}

/// Exact status match.
#[must_use]
pub fn by_status(tasks: &[Task], status: Status, include_archived: bool) -> Vec<Task> {
    scoped(tasks, include_archived)
        .filter(|t| t.status == status)
        .cloned()
        .collect()
}

/// Permissive tag match: a task matches if ANY of its tags contains ANY of
/// the query tags as a case-insensitive substring.
#[must_use]
pub fn by_tags(tasks: &[Task], query: &[String], include_archived: bool) -> Vec<Task> {
    let needles: Vec<String> = query.iter().map(|q| q.to_lowercase()).collect();
    scoped(tasks, include_archived)
        .filter(|t| {
            t.tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                needles.iter().any(|needle| tag.contains(needle))
            })
        })
        .cloned()
        .collect()
}

/// Exact due-date match.
#[must_use]
pub fn by_date(tasks: &[Task], date: &str, include_archived: bool) -> Vec<Task> {
    scoped(tasks, include_archived)
        .filter(|t| t.due_date == date)
        .cloned()
        .collect()
}

/// Inclusive lexical date range: `start <= due_date <= end`. Valid because
/// the date encoding is fixed-width and zero-padded.
#[must_use]
pub fn by_date_range(tasks: &[Task], start: &str, end: &str, include_archived: bool) -> Vec<Task> {
    scoped(tasks, include_archived)
        .filter(|t| t.due_date.as_str() >= start && t.due_date.as_str() <= end)
        .cloned()
        .collect()
}

/// Case-insensitive substring search over title OR description.
#[must_use]
pub fn search(tasks: &[Task], term: &str, include_archived: bool) -> Vec<Task> {
    let term = term.to_lowercase();
    scoped(tasks, include_archived)
        .filter(|t| {
            t.title.to_lowercase().contains(&term) || t.description.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Tasks due exactly today.
#[must_use]
pub fn todays(tasks: &[Task], include_archived: bool) -> Vec<Task> {
    by_date(tasks, &today(), include_archived)
}

/// Active tasks due today or later (open-ended client view).
#[must_use]
pub fn upcoming(tasks: &[Task]) -> Vec<Task> {
    let today = today();
    tasks
        .iter()
        .filter(|t| !t.archived && t.due_date >= today)
        .cloned()
        .collect()
}

/// Tasks due within `[today, today + 7 days]`, true-date comparison.
///
/// Tasks with an unparseable due date never match.
#[must_use]
pub fn upcoming_window(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    let Some(horizon) = today.checked_add_days(Days::new(7)) else {
        return Vec::new();
    };
    tasks
        .iter()
        .filter(|t| {
            NaiveDate::parse_from_str(&t.due_date, "%Y-%m-%d")
                .is_ok_and(|d| d >= today && d <= horizon)
        })
        .cloned()
        .collect()
}

/// Active tasks strictly past their due date. Tasks due today are not
/// overdue yet.
#[must_use]
pub fn overdue(tasks: &[Task]) -> Vec<Task> {
    let today = today();
    tasks
        .iter()
        .filter(|t| !t.archived && !t.due_date.is_empty() && t.due_date < today)
        .cloned()
        .collect()
}

/// The filter set accepted by `GET /api/tasks`, applied conjunctively.
///
/// Field spellings match the wire (`startDate`, `endDate`); `tags` is the
/// raw comma-separated query value. Absent filters pass through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        rename = "startDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl TaskFilters {
    /// Apply every present filter, AND semantics, over the full slice.
    ///
    /// This is the server-side variant: `status` and `category` match their
    /// human-readable labels case-insensitively, and archived records are
    /// not excluded (the reference backend never filtered them).
    #[must_use]
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        let mut filtered: Vec<Task> = tasks.to_vec();

        if let Some(tags) = &self.tags {
            let query: Vec<String> = tags.split(',').map(str::to_string).collect();
            filtered = by_tags(&filtered, &query, true);
        }

        if let Some(date) = &self.date {
            filtered = by_date(&filtered, date, true);
        }

        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            filtered = by_date_range(&filtered, start, end, true);
        }

        if let Some(category) = &self.category {
            filtered.retain(|t| t.category.label().eq_ignore_ascii_case(category));
        }

        if let Some(status) = &self.status {
            filtered.retain(|t| t.status.label().eq_ignore_ascii_case(status));
        }

        if let Some(term) = &self.search {
            filtered = search(&filtered, term, true);
        }

        filtered
    }
}

/// Aggregate counts over the collection. Per-status counts cover the
/// active subset only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub archived: usize,
    pub completed: usize,
    #[serde(rename = "inProgress")]
    pub in_progress: usize,
    pub todo: usize,
}

#[must_use]
pub fn stats(tasks: &[Task]) -> TaskStats {
    let active: Vec<&Task> = tasks.iter().filter(|t| !t.archived).collect();
    let count_status = |s: Status| active.iter().filter(|t| t.status == s).count();

    TaskStats {
        total: tasks.len(),
        active: active.len(),
        archived: tasks.len() - active.len(),
        completed: count_status(Status::Complete),
        in_progress: count_status(Status::InProgress),
        todo: count_status(Status::Todo),
    }
}
