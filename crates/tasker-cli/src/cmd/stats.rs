//! `tk stats` — collection counters.

use crate::output::{self, OutputMode};
use tasker_core::SyncEngine;
use tasker_core::query;

pub fn run_stats(engine: &SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    let stats = query::stats(engine.tasks());
    if output.is_json() {
        return output::render_json(&stats);
    }
    println!("{:<12} {}", "total:", stats.total);
    println!("{:<12} {}", "active:", stats.active);
    println!("{:<12} {}", "archived:", stats.archived);
    println!("{:<12} {}", "todo:", stats.todo);
    println!("{:<12} {}", "in progress:", stats.in_progress);
    println!("{:<12} {}", "completed:", stats.completed);
    Ok(())
}
