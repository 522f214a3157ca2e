//! `tk list` — list tasks with filtering.

use crate::output::{self, OutputMode};
use clap::Args;
use tasker_core::SyncEngine;
use tasker_core::model::Task;
use tasker_core::query;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show archived tasks instead of active ones.
    #[arg(short, long, conflicts_with = "all")]
    pub archived: bool,

    /// Show active and archived tasks together.
    #[arg(long)]
    pub all: bool,

    /// Filter by status: todo, in-progress, complete.
    #[arg(short, long)]
    pub status: Option<String>,

    /// Filter by category: personal, work, urgent, other.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Filter by tag substring (repeatable, any match).
    #[arg(short, long)]
    pub tag: Vec<String>,

    /// Substring search over title and notes.
    #[arg(long)]
    pub search: Option<String>,

    /// Only tasks due on this exact date, `YYYY-MM-DD`.
    #[arg(long)]
    pub due: Option<String>,

    /// Start of an inclusive due-date range.
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// End of an inclusive due-date range.
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

pub fn run_list(args: &ListArgs, engine: &SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    let mut tasks: Vec<Task> = if args.all {
        engine.tasks().to_vec()
    } else if args.archived {
        engine.archived_tasks()
    } else {
        engine.active_tasks()
    };

    if let Some(status) = &args.status {
        tasks = query::by_status(&tasks, status.parse()?, true);
    }
    if let Some(category) = &args.category {
        tasks = query::by_category(&tasks, category.parse()?, true);
    }
    if !args.tag.is_empty() {
        tasks = query::by_tags(&tasks, &args.tag, true);
    }
    if let Some(needle) = &args.search {
        tasks = query::search(&tasks, needle, true);
    }
    if let Some(date) = &args.due {
        tasks = query::by_date(&tasks, date, true);
    }
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        tasks = query::by_date_range(&tasks, from, to, true);
    }

    output::render_tasks(output, &tasks)
}
