//! `tk show` — display a single task.

use crate::output::{self, OutputMode};
use anyhow::bail;
use clap::Args;
use tasker_core::SyncEngine;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Task id.
    pub id: u64,
}

pub fn run_show(args: &ShowArgs, engine: &SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    let Some(task) = engine.tasks().iter().find(|t| t.id == args.id) else {
        bail!("no task with id {}", args.id);
    };
    output::render_task(output, task)
}
