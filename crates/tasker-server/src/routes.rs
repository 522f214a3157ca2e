//! HTTP surface: the task-collection endpoints and their response envelope.
//!
//! Every response is wrapped in `{success, data?, total?, filters?,
//! message?, error?}`. Error paths are HTTP 500 except not-found, which is
//! 404 — including validation-ish failures, a looseness carried over from
//! the reference backend on purpose.

// Handlers are async for axum's sake; the store itself is synchronous.
#![allow(clippy::unused_async)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tasker_core::model::Task;
use tasker_core::query::{self, TaskFilters};
use tracing::error;

use crate::store::{FileStore, TaskRecord};

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<TaskFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Envelope {
    fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: None,
            filters: None,
            message: None,
            error: None,
            timestamp: None,
        }
    }

    fn message(message: &str) -> Self {
        Self {
            data: None,
            message: Some(message.to_string()),
            ..Self::ok(Value::Null)
        }
    }

    fn not_found() -> (StatusCode, Json<Self>) {
        let envelope = Self {
            success: false,
            data: None,
            total: None,
            filters: None,
            message: Some("Task not found".to_string()),
            error: None,
            timestamp: None,
        };
        (StatusCode::NOT_FOUND, Json(envelope))
    }

    fn failure(message: &str, err: &anyhow::Error) -> (StatusCode, Json<Self>) {
        error!(%err, "{message}");
        let envelope = Self {
            success: false,
            data: None,
            total: None,
            filters: None,
            message: Some(message.to_string()),
            error: Some(err.to_string()),
            timestamp: None,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope))
    }
}

type Reply = (StatusCode, Json<Envelope>);

pub fn router(store: Arc<FileStore>) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks).post(create_task).put(replace_tasks),
        )
        .route("/api/tasks/filter/today", get(today_tasks))
        .route("/api/tasks/filter/upcoming", get(upcoming_tasks))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/health", get(health))
        .with_state(store)
}

/// Keep the records whose task survived a filter pass.
fn matching_records(records: Vec<TaskRecord>, matched: &[Task]) -> Vec<TaskRecord> {
    let ids: HashSet<u64> = matched.iter().map(|t| t.id).collect();
    records
        .into_iter()
        .filter(|r| ids.contains(&r.task.id))
        .collect()
}

fn records_json(records: &[TaskRecord]) -> Value {
    serde_json::to_value(records).unwrap_or(Value::Null)
}

fn record_json(record: &TaskRecord) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}

async fn list_tasks(
    State(store): State<Arc<FileStore>>,
    Query(filters): Query<TaskFilters>,
) -> Reply {
    let records = store.list();
    let tasks: Vec<Task> = records.iter().map(|r| r.task.clone()).collect();
    let matched = filters.apply(&tasks);
    let data = matching_records(records, &matched);

    let envelope = Envelope {
        total: Some(data.len()),
        filters: Some(filters),
        ..Envelope::ok(records_json(&data))
    };
    (StatusCode::OK, Json(envelope))
}

async fn get_task(State(store): State<Arc<FileStore>>, Path(id): Path<u64>) -> Reply {
    store.get(id).map_or_else(Envelope::not_found, |record| {
        (StatusCode::OK, Json(Envelope::ok(record_json(&record))))
    })
}

async fn create_task(State(store): State<Arc<FileStore>>, Json(task): Json<Task>) -> Reply {
    match store.create(task) {
        Ok(record) => {
            let envelope = Envelope {
                message: Some("Created task!".to_string()),
                ..Envelope::ok(record_json(&record))
            };
            (StatusCode::CREATED, Json(envelope))
        }
        Err(err) => Envelope::failure("Error saving task", &err),
    }
}

async fn update_task(
    State(store): State<Arc<FileStore>>,
    Path(id): Path<u64>,
    Json(patch): Json<Value>,
) -> Reply {
    match store.update(id, &patch) {
        Ok(Some(record)) => {
            let envelope = Envelope {
                message: Some("Task updated successfully".to_string()),
                ..Envelope::ok(record_json(&record))
            };
            (StatusCode::OK, Json(envelope))
        }
        Ok(None) => Envelope::not_found(),
        Err(err) => Envelope::failure("Error updating task", &err),
    }
}

async fn delete_task(State(store): State<Arc<FileStore>>, Path(id): Path<u64>) -> Reply {
    match store.delete(id) {
        Ok(true) => (
            StatusCode::OK,
            Json(Envelope::message("Task deleted successfully")),
        ),
        Ok(false) => Envelope::not_found(),
        Err(err) => Envelope::failure("Error deleting task", &err),
    }
}

async fn replace_tasks(
    State(store): State<Arc<FileStore>>,
    Json(tasks): Json<Vec<Task>>,
) -> Reply {
    match store.replace_all(tasks) {
        Ok(total) => {
            let envelope = Envelope {
                total: Some(total),
                message: Some("Collection replaced".to_string()),
                ..Envelope::ok(Value::Null)
            };
            (StatusCode::OK, Json(envelope))
        }
        Err(err) => Envelope::failure("Error saving tasks", &err),
    }
}

async fn today_tasks(State(store): State<Arc<FileStore>>) -> Reply {
    let records = store.list();
    let today = query::today();
    let data: Vec<TaskRecord> = records
        .into_iter()
        .filter(|r| r.task.due_date == today)
        .collect();

    let envelope = Envelope {
        total: Some(data.len()),
        ..Envelope::ok(records_json(&data))
    };
    (StatusCode::OK, Json(envelope))
}

async fn upcoming_tasks(State(store): State<Arc<FileStore>>) -> Reply {
    let records = store.list();
    let tasks: Vec<Task> = records.iter().map(|r| r.task.clone()).collect();
    let matched = query::upcoming_window(&tasks, Local::now().date_naive());
    let data = matching_records(records, &matched);

    let envelope = Envelope {
        total: Some(data.len()),
        ..Envelope::ok(records_json(&data))
    };
    (StatusCode::OK, Json(envelope))
}

async fn health() -> Reply {
    let envelope = Envelope {
        timestamp: Some(chrono::Utc::now().to_rfc3339()),
        ..Envelope::message("Tasker backend is running")
    };
    (StatusCode::OK, Json(envelope))
}

#[cfg(test)]
mod tests {
    use super::Envelope;
    use serde_json::{Value, json};

    #[test]
    fn envelope_omits_absent_fields() {
        let value = serde_json::to_value(Envelope::ok(json!([]))).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], json!([]));
        assert!(value.get("message").is_none());
        assert!(value.get("error").is_none());
        assert!(value.get("total").is_none());
    }

    #[test]
    fn not_found_is_404_with_message() {
        let (status, body) = Envelope::not_found();
        assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
        let value = serde_json::to_value(&body.0).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Task not found");
    }

    #[test]
    fn failure_is_500_with_error_detail() {
        let err = anyhow::anyhow!("disk full");
        let (status, body) = Envelope::failure("Error saving task", &err);
        assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let value = serde_json::to_value(&body.0).unwrap();
        assert_eq!(value["message"], "Error saving task");
        assert_eq!(value["error"], "disk full");
        assert!(matches!(value["data"], Value::Null | Value::Object(_)));
    }
}
