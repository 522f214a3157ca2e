//! `tk rm` — delete a task outright.

use crate::output::{self, OutputMode};
use clap::Args;
use tasker_core::SyncEngine;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Task id.
    pub id: u64,
}

pub fn run_delete(
    args: &DeleteArgs,
    engine: &mut SyncEngine,
    output: OutputMode,
) -> anyhow::Result<()> {
    engine.delete_task(args.id)?;
    output::render_success(output, &format!("Task #{} deleted", args.id))
}
