//! `tk archive` / `tk unarchive` — move tasks in and out of the archive.

use crate::output::{self, OutputMode};
use clap::Args;
use tasker_core::SyncEngine;

#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Task id.
    pub id: u64,
}

pub fn run_archive(
    args: &ArchiveArgs,
    engine: &mut SyncEngine,
    output: OutputMode,
) -> anyhow::Result<()> {
    engine.archive_task(args.id)?;
    output::render_success(output, &format!("Task #{} archived", args.id))
}

pub fn run_unarchive(
    args: &ArchiveArgs,
    engine: &mut SyncEngine,
    output: OutputMode,
) -> anyhow::Result<()> {
    engine.unarchive_task(args.id)?;
    output::render_success(output, &format!("Task #{} restored", args.id))
}
