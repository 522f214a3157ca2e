//! Compiled-in defaults: the collection of last resort.
//!
//! Used only when the remote, the cache, and the bundled seed have all
//! failed. Mirrors the reference client's fallback tasks exactly.

use crate::model::{Category, Status, Task};

/// The four literal fallback tasks.
#[must_use]
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Buy groceries".to_string(),
            description: "Get ingredients for dinner this week".to_string(),
            status: Status::InProgress,
            category: Category::Personal,
            due_date: "2025-07-02".to_string(),
            tags: vec!["shopping".to_string(), "food".to_string()],
            archived: false,
        },
        Task {
            id: 2,
            title: "Walk the dog".to_string(),
            description: "Morning walk in the park".to_string(),
            status: Status::Todo,
            category: Category::Personal,
            due_date: "2025-07-02".to_string(),
            tags: vec!["exercise".to_string(), "pet".to_string()],
            archived: false,
        },
        Task {
            id: 3,
            title: "Complete project report".to_string(),
            description: "Finish quarterly report for management".to_string(),
            status: Status::InProgress,
            category: Category::Work,
            due_date: "2025-07-05".to_string(),
            tags: vec!["work".to_string(), "report".to_string()],
            archived: false,
        },
        Task {
            id: 4,
            title: "Old completed task".to_string(),
            description: "This is an archived task".to_string(),
            status: Status::Complete,
            category: Category::Work,
            due_date: "2025-06-28".to_string(),
            tags: vec!["archived".to_string(), "old".to_string()],
            archived: true,
        },
    ]
}
