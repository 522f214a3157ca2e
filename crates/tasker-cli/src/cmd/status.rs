//! `tk status` and `tk done` — move a task through its workflow.

use crate::output::{self, OutputMode};
use clap::Args;
use tasker_core::SyncEngine;
use tasker_core::model::Status;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Task id.
    pub id: u64,

    /// New status: todo, in-progress, complete.
    pub status: String,
}

#[derive(Args, Debug)]
pub struct DoneArgs {
    /// Task id.
    pub id: u64,
}

pub fn run_status(
    args: &StatusArgs,
    engine: &mut SyncEngine,
    output: OutputMode,
) -> anyhow::Result<()> {
    let status: Status = args.status.parse()?;
    engine.update_status(args.id, status)?;
    output::render_success(
        output,
        &format!("Task #{} is now {}", args.id, status.label()),
    )
}

pub fn run_done(args: &DoneArgs, engine: &mut SyncEngine, output: OutputMode) -> anyhow::Result<()> {
    engine.update_status(args.id, Status::Complete)?;
    output::render_success(output, &format!("Task #{} completed", args.id))
}

#[cfg(test)]
mod tests {
    use super::StatusArgs;

    #[test]
    fn status_args_take_id_and_label() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: StatusArgs,
        }
        let w = Wrapper::parse_from(["test", "3", "in-progress"]);
        assert_eq!(w.args.id, 3);
        assert_eq!(w.args.status, "in-progress");
    }
}
