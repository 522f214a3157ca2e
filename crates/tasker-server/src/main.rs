#![forbid(unsafe_code)]

mod routes;
mod store;

use anyhow::Context;
use clap::Parser;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use store::FileStore;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tasker-server: reference HTTP backend for the tasker sync engine",
    long_about = None
)]
struct Cli {
    /// Port to listen on (falls back to PORT, then 3001).
    #[arg(short, long)]
    port: Option<u16>,

    /// Path of the JSON blob holding the task collection.
    #[arg(long, default_value = "tasks.json")]
    data: PathBuf,
}

impl Cli {
    fn resolved_port(&self) -> u16 {
        self.port
            .or_else(|| env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .unwrap_or(3001)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "tasker=debug,info"
        } else {
            "tasker=info,warn"
        })
    });

    let format = env::var("TASKER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.resolved_port()));
    let store = Arc::new(FileStore::new(cli.data.clone()));

    let app = routes::router(store);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, data = %cli.data.display(), "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn port_flag_wins_over_default() {
        let cli = Cli::parse_from(["tasker-server", "--port", "8080"]);
        assert_eq!(cli.resolved_port(), 8080);
    }

    #[test]
    fn data_path_defaults_to_local_blob() {
        let cli = Cli::parse_from(["tasker-server"]);
        assert_eq!(cli.data, std::path::PathBuf::from("tasks.json"));
    }
}
