//! File-backed task store: one shared JSON document, read on every request,
//! written back whole after every mutation.
//!
//! Records carry timestamp metadata (`createdAt` / `updatedAt`) that exists
//! only at this persistence boundary; the core [`Task`] model knows nothing
//! about it.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tasker_core::model::Task;
use tracing::warn;

/// A stored task plus the metadata the backend stamps onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(flatten)]
    pub task: Task,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            task,
            created_at: None,
            updated_at: None,
        }
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct FileStore {
    path: PathBuf,
    // Serializes the read-modify-write cycle across concurrent requests.
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Read the whole collection. Absent or unreadable file is an empty
    /// collection, matching the reference backend.
    fn read(&self) -> Vec<TaskRecord> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(%err, path = %self.path.display(), "tasks file is corrupt; serving empty");
                Vec::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(%err, path = %self.path.display(), "tasks file unreadable; serving empty");
                Vec::new()
            }
        }
    }

    fn write(&self, records: &[TaskRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records).context("serialize tasks file")?;
        fs::write(&self.path, json)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }

    pub fn list(&self) -> Vec<TaskRecord> {
        let _guard = self.lock.lock().expect("store lock");
        self.read()
    }

    pub fn get(&self, id: u64) -> Option<TaskRecord> {
        self.list().into_iter().find(|r| r.task.id == id)
    }

    /// Append a new record: id = `max(existing) + 1`, `createdAt` stamped.
    pub fn create(&self, task: Task) -> Result<TaskRecord> {
        let _guard = self.lock.lock().expect("store lock");
        let mut records = self.read();

        let next_id = records.iter().map(|r| r.task.id).max().unwrap_or(0) + 1;
        let record = TaskRecord {
            task: Task { id: next_id, ..task },
            created_at: Some(now_iso()),
            updated_at: None,
        };

        records.push(record.clone());
        self.write(&records)?;
        Ok(record)
    }

    /// Merge a partial JSON body into the matching record. The id always
    /// wins over anything in the patch; `updatedAt` is stamped. Returns
    /// `None` when the id is absent.
    pub fn update(&self, id: u64, patch: &Value) -> Result<Option<TaskRecord>> {
        let _guard = self.lock.lock().expect("store lock");
        let mut records = self.read();

        let Some(index) = records.iter().position(|r| r.task.id == id) else {
            return Ok(None);
        };

        let mut merged = serde_json::to_value(&records[index]).context("record to value")?;
        if let (Some(target), Some(fields)) = (merged.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
            target.insert("id".to_string(), Value::from(id));
            target.insert("updatedAt".to_string(), Value::from(now_iso()));
        }

        // The lenient label decoding repairs any junk the patch smuggled in.
        let record: TaskRecord = serde_json::from_value(merged).context("merged record")?;
        records[index] = record.clone();
        self.write(&records)?;
        Ok(Some(record))
    }

    /// Remove the matching record. Returns whether it existed.
    pub fn delete(&self, id: u64) -> Result<bool> {
        let _guard = self.lock.lock().expect("store lock");
        let mut records = self.read();
        let before = records.len();
        records.retain(|r| r.task.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write(&records)?;
        Ok(true)
    }

    /// Replace the whole collection (the bulk write-through endpoint).
    /// `createdAt` survives for ids that already existed; everything gets
    /// a fresh `updatedAt`.
    pub fn replace_all(&self, tasks: Vec<Task>) -> Result<usize> {
        let _guard = self.lock.lock().expect("store lock");
        let existing = self.read();
        let stamp = now_iso();

        let records: Vec<TaskRecord> = tasks
            .into_iter()
            .map(|task| {
                let created_at = existing
                    .iter()
                    .find(|r| r.task.id == task.id)
                    .and_then(|r| r.created_at.clone())
                    .or_else(|| Some(stamp.clone()));
                TaskRecord {
                    task,
                    created_at,
                    updated_at: Some(stamp.clone()),
                }
            })
            .collect();

        self.write(&records)?;
        Ok(records.len())
    }
}
