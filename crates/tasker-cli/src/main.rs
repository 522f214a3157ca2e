#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tasker_core::SyncEngine;
use tasker_core::config::{EngineConfig, load_user_config};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tk: personal task tracker",
    long_about = None
)]
struct Cli {
    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Fail on mutations that target a missing task id.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a task.
    Add(cmd::add::AddArgs),
    /// List tasks with filtering.
    #[command(visible_alias = "ls")]
    List(cmd::list::ListArgs),
    /// Show one task in full.
    Show(cmd::show::ShowArgs),
    /// Set a task's status.
    Status(cmd::status::StatusArgs),
    /// Mark a task complete.
    Done(cmd::status::DoneArgs),
    /// Archive a task.
    Archive(cmd::archive::ArchiveArgs),
    /// Restore an archived task.
    Unarchive(cmd::archive::ArchiveArgs),
    /// Delete a task.
    Rm(cmd::delete::DeleteArgs),
    /// Tasks due today.
    Today,
    /// Active tasks due today or later.
    Upcoming,
    /// Active tasks past their due date.
    Overdue,
    /// Collection counters.
    Stats,
    /// Write the collection to the export directory.
    Export,
    /// Replace the collection from a JSON file.
    Import(cmd::transfer::ImportArgs),
    /// Restore the built-in starter tasks.
    Reset(cmd::admin::ConfirmArgs),
    /// Delete every task.
    Clear(cmd::admin::ConfirmArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "tasker=debug,info"
        } else {
            "tasker=warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = cli.output_mode();

    let user = load_user_config()?;
    let mut config = EngineConfig::resolve(user);
    if cli.strict {
        config.strict = true;
    }

    let mut engine = SyncEngine::new(&config);
    engine.resolve();

    let result = match &cli.command {
        Commands::Add(args) => cmd::add::run_add(args, &mut engine, output),
        Commands::List(args) => cmd::list::run_list(args, &engine, output),
        Commands::Show(args) => cmd::show::run_show(args, &engine, output),
        Commands::Status(args) => cmd::status::run_status(args, &mut engine, output),
        Commands::Done(args) => cmd::status::run_done(args, &mut engine, output),
        Commands::Archive(args) => cmd::archive::run_archive(args, &mut engine, output),
        Commands::Unarchive(args) => cmd::archive::run_unarchive(args, &mut engine, output),
        Commands::Rm(args) => cmd::delete::run_delete(args, &mut engine, output),
        Commands::Today => cmd::views::run_today(&engine, output),
        Commands::Upcoming => cmd::views::run_upcoming(&engine, output),
        Commands::Overdue => cmd::views::run_overdue(&engine, output),
        Commands::Stats => cmd::stats::run_stats(&engine, output),
        Commands::Export => cmd::transfer::run_export(&engine, output),
        Commands::Import(args) => cmd::transfer::run_import(args, &mut engine, output),
        Commands::Reset(args) => cmd::admin::run_reset(args, &mut engine, output),
        Commands::Clear(args) => cmd::admin::run_clear(args, &mut engine, output),
    };

    // Queued writes land before the process exits.
    engine.flush();
    result
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn global_flags_reach_subcommands() {
        let cli = Cli::parse_from(["tk", "list", "--json", "--strict"]);
        assert!(cli.json);
        assert!(cli.strict);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn ls_aliases_list() {
        let cli = Cli::parse_from(["tk", "ls"]);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn upcoming_help_describes_the_open_ended_view() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let about = cmd
            .get_subcommands()
            .find(|c| c.get_name() == "upcoming")
            .and_then(clap::Command::get_about)
            .map(ToString::to_string)
            .unwrap_or_default();
        assert!(about.contains("due today or later"));
    }
}
