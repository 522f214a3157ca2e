//! Remote API adapter: the highest-trust tier.
//!
//! Reads the full collection from `GET /api/tasks` and writes it back with
//! a bulk `PUT /api/tasks`. Any transport failure or non-2xx response is a
//! tier failure; the engine falls back, it never retries here.

use crate::error::{StoreError, Tier};
use crate::model::Task;
use crate::store::TaskSource;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Response envelope the backend wraps every payload in.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<Task>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RemoteStore {
    agent: ureq::Agent,
    base: String,
}

impl RemoteStore {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(5))
            .build();
        Self {
            agent,
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

impl TaskSource for RemoteStore {
    fn tier(&self) -> Tier {
        Tier::Remote
    }

    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let unavailable = |reason: String| StoreError::SourceUnavailable {
            tier: Tier::Remote,
            reason,
        };

        let url = self.url("/api/tasks");
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| unavailable(e.to_string()))?;

        let envelope: ListEnvelope = response
            .into_json()
            .map_err(|e| unavailable(format!("bad response body: {e}")))?;

        if !envelope.success {
            return Err(unavailable(
                envelope
                    .message
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }

        debug!(count = envelope.data.len(), %url, "loaded collection from remote");
        Ok(envelope.data)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let failed = |reason: String| StoreError::WriteFailed {
            tier: Tier::Remote,
            reason,
        };

        let url = self.url("/api/tasks");
        self.agent
            .put(&url)
            .send_json(tasks)
            .map_err(|e| failed(e.to_string()))?;

        debug!(count = tasks.len(), %url, "pushed collection to remote");
        Ok(())
    }
}
