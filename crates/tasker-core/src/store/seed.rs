//! Bundled seed data: a JSON document compiled into the binary.

use crate::error::{StoreError, Tier};
use crate::model::Task;
use crate::store::TaskSource;
use tracing::debug;

const SEED_JSON: &str = include_str!("../../assets/seed.json");

/// Read-only tier backed by the packaged seed document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedStore;

impl SeedStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TaskSource for SeedStore {
    fn tier(&self) -> Tier {
        Tier::Seed
    }

    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let tasks: Vec<Task> =
            serde_json::from_str(SEED_JSON).map_err(|e| StoreError::SourceUnavailable {
                tier: Tier::Seed,
                reason: format!("seed document failed to parse: {e}"),
            })?;
        debug!(count = tasks.len(), "loaded collection from seed data");
        Ok(tasks)
    }
}
