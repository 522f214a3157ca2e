//! Property checks over the label encoding: exporting a collection and
//! re-importing it yields an equal collection, for arbitrary tasks.

use proptest::prelude::*;
use tasker_core::model::{Category, Status, Task};

fn status_strategy() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn date_strategy() -> impl Strategy<Value = String> {
    (2024u32..2027, 1u32..13, 1u32..29)
        .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (
        1u64..100_000,
        "[A-Za-z][A-Za-z0-9 ]{0,24}",
        "[A-Za-z0-9 ,.]{0,60}",
        status_strategy(),
        category_strategy(),
        date_strategy(),
        prop::collection::vec("[a-z]{1,10}", 0..5),
        any::<bool>(),
    )
        .prop_map(
            |(id, title, description, status, category, due_date, tags, archived)| Task {
                id,
                title,
                description,
                status,
                category,
                due_date,
                tags,
                archived,
            },
        )
}

proptest! {
    #[test]
    fn collection_roundtrips_through_label_encoding(
        tasks in prop::collection::vec(task_strategy(), 0..20)
    ) {
        let exported = serde_json::to_string_pretty(&tasks).expect("serialize");
        let imported: Vec<Task> = serde_json::from_str(&exported).expect("parse");
        prop_assert_eq!(imported, tasks);
    }

    #[test]
    fn status_labels_roundtrip(status in status_strategy()) {
        prop_assert_eq!(Status::from_label(status.label()), status);
    }

    #[test]
    fn category_labels_roundtrip(category in category_strategy()) {
        prop_assert_eq!(Category::from_label(category.label()), category);
    }

    #[test]
    fn decoding_any_string_never_fails(label in ".*") {
        // Total decoding: arbitrary junk repairs to the defaults.
        let status = Status::from_label(&label);
        let category = Category::from_label(&label);
        prop_assert!(Status::ALL.contains(&status));
        prop_assert!(Category::ALL.contains(&category));
    }
}
