//! Persistence tiers behind one uniform contract.
//!
//! Three adapters implement [`TaskSource`], ordered by trust at startup:
//! the remote API, the local durable cache, and the bundled seed asset.
//! Hardcoded defaults (not an adapter) back all three. The export sink is
//! the terminal write fallback: a file artifact the user keeps when every
//! durable tier has failed.

pub mod cache;
pub mod defaults;
pub mod export;
pub mod remote;
pub mod seed;

pub use cache::CacheStore;
pub use export::ExportSink;
pub use remote::RemoteStore;
pub use seed::SeedStore;

use crate::error::{StoreError, Tier};
use crate::model::Task;

/// Uniform contract over one storage tier.
pub trait TaskSource: Send + Sync {
    /// Which tier this adapter represents, for logs and errors.
    fn tier(&self) -> Tier;

    /// Load the full collection.
    ///
    /// # Errors
    ///
    /// `SourceUnavailable` when the tier has nothing usable; callers fall
    /// through the precedence chain rather than surfacing this.
    fn load(&self) -> Result<Vec<Task>, StoreError>;

    /// Persist the full collection.
    ///
    /// # Errors
    ///
    /// `WriteFailed` when the tier rejects the write. Read-only tiers keep
    /// this default implementation.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let _ = tasks;
        Err(StoreError::WriteFailed {
            tier: self.tier(),
            reason: "tier is read-only".to_string(),
        })
    }
}
