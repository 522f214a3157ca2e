//! Local durable cache: one JSON array blob under a single fixed key.
//!
//! The "key-value store" is the data directory; the fixed key is
//! [`CACHE_KEY`]. An absent, unparseable, or empty blob is a cache miss,
//! never an error surfaced past the resolution chain.

use crate::error::{StoreError, Tier};
use crate::model::Task;
use crate::store::TaskSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The single fixed key the collection is stored under.
pub const CACHE_KEY: &str = "tasks.json";

#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CACHE_KEY),
        }
    }

    /// Path of the cache blob, for diagnostics.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the cache entry. Missing entry is already-purged, not an error.
    ///
    /// # Errors
    ///
    /// `WriteFailed` if the blob exists but cannot be removed.
    pub fn purge(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "purged cache entry");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteFailed {
                tier: Tier::Cache,
                reason: e.to_string(),
            }),
        }
    }

    fn miss(reason: impl Into<String>) -> StoreError {
        StoreError::SourceUnavailable {
            tier: Tier::Cache,
            reason: reason.into(),
        }
    }
}

impl TaskSource for CacheStore {
    fn tier(&self) -> Tier {
        Tier::Cache
    }

    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|e| Self::miss(e.to_string()))?;

        let tasks: Vec<Task> = serde_json::from_str(&content)
            .map_err(|e| Self::miss(format!("corrupt cache blob: {e}")))?;

        if tasks.is_empty() {
            return Err(Self::miss("cached collection is empty"));
        }

        debug!(count = tasks.len(), "loaded collection from cache");
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let failed = |reason: String| StoreError::WriteFailed {
            tier: Tier::Cache,
            reason,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| failed(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(tasks).map_err(|e| failed(e.to_string()))?;

        // Write-then-rename so a crash mid-write never leaves a torn blob.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| failed(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| failed(e.to_string()))?;

        debug!(count = tasks.len(), path = %self.path.display(), "wrote collection to cache");
        Ok(())
    }
}
