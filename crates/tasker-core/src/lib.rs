//! tasker-core: task model, persistence tiers, and the write-through sync
//! engine behind the tasker CLI and server.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums ([`error::StoreError`]) inside the
//!   library; `anyhow::Result` at binary boundaries.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).

pub mod bus;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod query;
pub mod store;

pub use engine::SyncEngine;
pub use error::{StoreError, Tier};
pub use model::{Category, Status, Task};
