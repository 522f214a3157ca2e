//! `tk export` / `tk import` — move the collection in and out as JSON.

use crate::output::{self, OutputMode};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use tasker_core::SyncEngine;
use tasker_core::store::export::read_import;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path of a JSON file holding an array of tasks.
    pub path: PathBuf,
}

pub fn run_export(engine: &SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    let path = engine.export_now()?;
    if output.is_json() {
        output::render_json(&json!({ "success": true, "path": path }))
    } else {
        output::render_success(output, &format!("Exported to {}", path.display()))
    }
}

/// Import replaces the collection wholesale. A malformed file fails before
/// anything is touched.
pub fn run_import(
    args: &ImportArgs,
    engine: &mut SyncEngine,
    output: OutputMode,
) -> anyhow::Result<()> {
    let tasks = read_import(&args.path)?;
    let total = tasks.len();
    engine.replace_all(tasks);
    output::render_success(output, &format!("Imported {total} tasks"))
}
