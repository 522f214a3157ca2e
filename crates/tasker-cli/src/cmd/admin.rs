//! `tk reset` / `tk clear` — destructive collection maintenance.

use crate::output::{self, OutputMode};
use anyhow::bail;
use clap::Args;
use tasker_core::SyncEngine;

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Skip the confirmation requirement.
    #[arg(long)]
    pub yes: bool,
}

pub fn run_reset(
    args: &ConfirmArgs,
    engine: &mut SyncEngine,
    output: OutputMode,
) -> anyhow::Result<()> {
    if !args.yes {
        bail!("reset discards the current collection; re-run with --yes");
    }
    engine.reset_to_defaults();
    output::render_success(
        output,
        &format!("Reset complete ({} tasks)", engine.tasks().len()),
    )
}

pub fn run_clear(
    args: &ConfirmArgs,
    engine: &mut SyncEngine,
    output: OutputMode,
) -> anyhow::Result<()> {
    if !args.yes {
        bail!("clear deletes every task; re-run with --yes");
    }
    engine.clear_all();
    output::render_success(output, "All tasks cleared")
}

#[cfg(test)]
mod tests {
    use super::ConfirmArgs;

    #[test]
    fn confirmation_defaults_off() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ConfirmArgs,
        }
        assert!(!Wrapper::parse_from(["test"]).args.yes);
        assert!(Wrapper::parse_from(["test", "--yes"]).args.yes);
    }
}
