//! `tk today` / `tk upcoming` / `tk overdue` — date-driven views.

use crate::output::{self, OutputMode};
use tasker_core::SyncEngine;
use tasker_core::query;

pub fn run_today(engine: &SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    output::render_tasks(output, &query::todays(engine.tasks(), false))
}

pub fn run_upcoming(engine: &SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    output::render_tasks(output, &query::upcoming(engine.tasks()))
}

pub fn run_overdue(engine: &SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    output::render_tasks(output, &query::overdue(engine.tasks()))
}
