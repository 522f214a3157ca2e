//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: readable text for humans, stable JSON for scripts.

use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use tasker_core::model::{Status, Task};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per result, or a JSON array).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Serialize a value as pretty JSON to stdout.
pub fn render_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Emit a status message in the requested mode.
pub fn render_success(mode: OutputMode, message: &str) -> Result<()> {
    if mode.is_json() {
        render_json(&json!({ "success": true, "message": message }))
    } else {
        println!("{message}");
        Ok(())
    }
}

fn status_glyph(status: Status) -> &'static str {
    match status {
        Status::Todo => "[ ]",
        Status::InProgress => "[~]",
        Status::Complete => "[x]",
    }
}

/// One-line summary used by every list-shaped command.
pub fn task_line(task: &Task) -> String {
    let mut line = format!("#{:<4} {} {}", task.id, status_glyph(task.status), task.title);
    if !task.due_date.is_empty() {
        line.push_str(&format!("  due {}", task.due_date));
    }
    line.push_str(&format!("  ({})", task.category.label()));
    if !task.tags.is_empty() {
        line.push_str(&format!("  [{}]", task.tags.join(", ")));
    }
    if task.archived {
        line.push_str("  (archived)");
    }
    line
}

/// Render a list of tasks in the requested mode.
pub fn render_tasks(mode: OutputMode, tasks: &[Task]) -> Result<()> {
    if mode.is_json() {
        return render_json(&tasks);
    }
    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(());
    }
    for task in tasks {
        println!("{}", task_line(task));
    }
    Ok(())
}

/// Render a single task with full detail.
pub fn render_task(mode: OutputMode, task: &Task) -> Result<()> {
    if mode.is_json() {
        return render_json(task);
    }
    println!("{}", task_line(task));
    println!("{:<10} {}", "status:", task.status.label());
    if !task.description.is_empty() {
        println!("{:<10} {}", "notes:", task.description);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, task_line};
    use tasker_core::model::{Status, Task};

    #[test]
    fn json_mode_detection() {
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Human.is_json());
    }

    #[test]
    fn task_line_carries_due_date_and_tags() {
        let task = Task {
            id: 7,
            title: "Buy milk".to_string(),
            due_date: "2026-09-01".to_string(),
            tags: vec!["errand".to_string()],
            ..Task::default()
        };
        let line = task_line(&task);
        assert!(line.contains("#7"));
        assert!(line.contains("Buy milk"));
        assert!(line.contains("due 2026-09-01"));
        assert!(line.contains("[errand]"));
        assert!(!line.contains("archived"));
    }

    #[test]
    fn task_line_marks_archive_and_completion() {
        let task = Task {
            id: 2,
            title: "Old".to_string(),
            status: Status::Complete,
            archived: true,
            ..Task::default()
        };
        let line = task_line(&task);
        assert!(line.contains("[x]"));
        assert!(line.contains("(archived)"));
    }
}
