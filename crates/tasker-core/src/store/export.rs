//! Export artifacts: the terminal write fallback and the user-facing export.
//!
//! When the remote save for a user mutation fails, the engine writes the
//! collection here so the latest state survives offline. The same sink
//! backs the explicit export operation.

use crate::error::{StoreError, Tier};
use crate::model::Task;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ExportSink {
    dir: PathBuf,
}

impl ExportSink {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the collection as a dated JSON artifact, returning its path.
    ///
    /// Same-day artifacts overwrite each other; the newest state wins.
    ///
    /// # Errors
    ///
    /// `WriteFailed` if the artifact cannot be serialized or written.
    pub fn write(&self, tasks: &[Task]) -> Result<PathBuf, StoreError> {
        let failed = |reason: String| StoreError::WriteFailed {
            tier: Tier::Export,
            reason,
        };

        fs::create_dir_all(&self.dir).map_err(|e| failed(e.to_string()))?;

        let stamp = chrono::Local::now().format("%Y-%m-%d");
        let path = self.dir.join(format!("tasker-export-{stamp}.json"));

        let json = serde_json::to_string_pretty(tasks).map_err(|e| failed(e.to_string()))?;
        fs::write(&path, json).map_err(|e| failed(e.to_string()))?;

        info!(path = %path.display(), count = tasks.len(), "wrote export artifact");
        Ok(path)
    }
}

/// Parse an import file: a JSON array of tasks in label encoding.
///
/// Unlike tier loads, malformed input here is surfaced to the caller so the
/// UI can report it.
///
/// # Errors
///
/// `MalformedInput` on unreadable or unparseable files.
pub fn read_import(path: &Path) -> Result<Vec<Task>, StoreError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StoreError::MalformedInput(format!("{}: {e}", path.display())))?;
    let tasks: Vec<Task> = serde_json::from_str(&content)?;
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::{ExportSink, read_import};
    use crate::error::StoreError;
    use crate::model::{Status, Task};

    #[test]
    fn export_then_import_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path().to_path_buf());
        let tasks = vec![
            Task {
                id: 1,
                title: "one".to_string(),
                status: Status::Complete,
                ..Task::default()
            },
            Task {
                id: 5,
                title: "five".to_string(),
                archived: true,
                ..Task::default()
            },
        ];

        let path = sink.write(&tasks).unwrap();
        assert_eq!(read_import(&path).unwrap(), tasks);
    }

    #[test]
    fn malformed_import_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[{\"id\": }]").unwrap();
        assert!(matches!(
            read_import(&path),
            Err(StoreError::MalformedInput(_))
        ));
    }
}
