use crate::{BoardId, ColumnId, CoreError, NewTask, Priority, Task, TaskId, parse_timestamp};

use chrono::{Datelike, TimeZone, Utc};
use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serde_json::json;

fn new_task() -> NewTask {
    NewTask::new(BoardId(1), ColumnId(10), "Write docs")
}

// =========================================================================
// Deserialization
// =========================================================================

#[test]
fn given_full_service_payload_when_deserialized_then_all_fields_mapped() {
    // Given
    let payload = json!({
        "id": 7,
        "title": "Ship it",
        "description": "before friday",
        "column_id": 3,
        "board_id": 1,
        "priority": "high",
        "due_date": "2025-03-01T12:30:00",
        "budget": 150.5,
        "tags": ["release", "ops"],
        "assigned_to_id": 42,
        "creator_id": 5,
        "created_at": "2025-01-01T00:00:00"
    });

    // When
    let task: Task = serde_json::from_value(payload).unwrap();

    // Then
    assert_that!(task.id, eq(TaskId(7)));
    assert_that!(task.column_id, eq(Some(ColumnId(3))));
    assert_that!(task.priority, eq(Priority::High));
    assert_that!(task.budget, eq(Some(150.5)));
    assert_that!(task.tags.len(), eq(2));
    assert_that!(
        task.due_date,
        eq(Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap()))
    );
}

#[test]
fn given_minimal_payload_when_deserialized_then_defaults_applied() {
    // Given
    let payload = json!({ "id": 1, "title": "Bare" });

    // When
    let task: Task = serde_json::from_value(payload).unwrap();

    // Then
    assert_that!(task.column_id, eq(None));
    assert_that!(task.priority, eq(Priority::Medium));
    assert!(task.tags.is_empty());
    assert!(task.due_date.is_none());
}

#[test]
fn given_string_tags_when_deserialized_then_split() {
    let csv: Task = serde_json::from_value(json!({"id": 1, "title": "t", "tags": "a, b,,c"})).unwrap();
    assert_eq!(csv.tags, vec!["a", "b", "c"]);

    let encoded: Task =
        serde_json::from_value(json!({"id": 1, "title": "t", "tags": "[\"x\",\"y\"]"})).unwrap();
    assert_eq!(encoded.tags, vec!["x", "y"]);

    let empty: Task = serde_json::from_value(json!({"id": 1, "title": "t", "tags": "{}"})).unwrap();
    assert!(empty.tags.is_empty());

    let null: Task = serde_json::from_value(json!({"id": 1, "title": "t", "tags": null})).unwrap();
    assert!(null.tags.is_empty());
}

#[test]
fn test_parse_timestamp_formats() {
    assert!(parse_timestamp("2025-03-01T10:00:00Z").is_some());
    assert!(parse_timestamp("2025-03-01T10:00:00+03:00").is_some());
    assert!(parse_timestamp("2025-03-01T10:00:00.123456").is_some());
    assert!(parse_timestamp("2025-03-01T10:00").is_some());
    assert_eq!(parse_timestamp("2025-03-01").unwrap().day(), 1);
    assert!(parse_timestamp("").is_none());
    assert!(parse_timestamp("next tuesday").is_none());
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn given_valid_task_when_validate_then_ok() {
    let mut task = new_task();
    task.budget = Some(0.0);
    task.due_date = parse_timestamp("2030-01-01");
    assert_that!(task.validate(), ok(anything()));
}

#[test]
fn given_blank_title_when_validate_then_error_names_field() {
    // Given
    let mut task = new_task();
    task.title = "   ".to_string();

    // When
    let result = task.validate();

    // Then
    assert_that!(result, err(anything()));
    match result.unwrap_err() {
        CoreError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("title")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_negative_budget_when_validate_then_error() {
    let mut task = new_task();
    task.budget = Some(-1.0);
    assert_that!(task.validate(), err(anything()));
}

#[test]
fn given_implausible_due_year_when_validate_then_error() {
    let mut task = new_task();
    task.due_date = parse_timestamp("2500-01-01");
    assert_that!(task.validate(), err(anything()));
}

#[test]
fn test_new_task_serializes_without_empty_optionals() {
    let body = serde_json::to_value(new_task()).unwrap();
    assert_eq!(body["board_id"], 1);
    assert_eq!(body["column_id"], 10);
    assert_eq!(body["priority"], "medium");
    assert!(body.get("budget").is_none());
    assert!(body.get("description").is_none());
}
