//! `tk add` — create a task.

use crate::output::{self, OutputMode};
use clap::Args;
use serde_json::json;
use tasker_core::SyncEngine;
use tasker_core::model::{Category, Status, Task};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task title.
    pub title: String,

    /// Longer free-text notes.
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Due date, `YYYY-MM-DD`.
    #[arg(long, default_value = "")]
    pub due: String,

    /// Category: personal, work, urgent, other.
    #[arg(short, long, default_value = "personal")]
    pub category: String,

    /// Initial status: todo, in-progress, complete.
    #[arg(short, long, default_value = "todo")]
    pub status: String,

    /// Tag (repeatable).
    #[arg(short, long)]
    pub tag: Vec<String>,
}

pub fn run_add(args: &AddArgs, engine: &mut SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    let status: Status = args.status.parse()?;
    let category: Category = args.category.parse()?;

    let id = engine.add_task(Task {
        title: args.title.clone(),
        description: args.description.clone(),
        due_date: args.due.clone(),
        status,
        category,
        tags: args.tag.clone(),
        ..Task::default()
    });

    if output.is_json() {
        output::render_json(&json!({ "success": true, "id": id }))
    } else {
        output::render_success(output, &format!("Created task #{id}: {}", args.title))
    }
}
