use crate::{BoardId, ColumnId, TaskId, build_view, parse_board};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serde_json::json;

#[test]
fn given_board_response_when_parsed_then_columns_and_tasks_typed() {
    // Given
    let payload = json!({
        "id": 4,
        "title": "Sprint board",
        "description": null,
        "is_public": false,
        "creator_id": 9,
        "is_active": true,
        "columns": [
            {"id": 1, "name": "К выполнению", "order": 0},
            {"id": 2, "name": "Готово", "order_index": 1}
        ],
        "tasks": [
            {"id": 11, "title": "a", "column_id": 1, "priority": "low", "tags": []}
        ]
    });

    // When
    let board = parse_board(BoardId(4), payload).unwrap();

    // Then
    assert_that!(board.id, eq(BoardId(4)));
    assert!(!board.is_public);
    assert_that!(board.columns.len(), eq(2));
    assert_that!(board.columns[1].position, eq(1));
    assert_that!(board.tasks[0].id, eq(TaskId(11)));
}

#[test]
fn given_payload_without_id_when_parsed_then_requested_id_used() {
    let payload = json!({"title": "x", "columns": [], "tasks": []});
    let board = parse_board(BoardId(77), payload).unwrap();
    assert_eq!(board.id, BoardId(77));
}

#[test]
fn given_error_shaped_tasks_when_parsed_then_dropped() {
    // Given
    let payload = json!({
        "title": "x",
        "columns": [{"id": 1, "name": "Todo"}],
        "tasks": [
            {"id": 1, "title": "real", "column_id": 1},
            {"type": "value_error", "loc": ["body", "title"], "msg": "field required"},
            {"id": 2, "title": "looks real", "msg": "but carries an error key"},
            {"title": "no id"},
            "not even an object",
            null
        ]
    });

    // When
    let board = parse_board(BoardId(1), payload).unwrap();

    // Then
    assert_that!(board.tasks.len(), eq(1));
    assert_that!(board.tasks[0].id, eq(TaskId(1)));
}

#[test]
fn given_missing_columns_when_parsed_then_rejected() {
    let result = parse_board(BoardId(1), json!({"title": "x", "tasks": []}));
    assert_that!(result, err(anything()));
}

#[test]
fn given_non_object_payload_when_parsed_then_rejected() {
    assert_that!(parse_board(BoardId(1), json!([1, 2, 3])), err(anything()));
    assert_that!(
        parse_board(BoardId(1), json!({"detail": "Board not found"})),
        err(anything())
    );
}

#[test]
fn given_malformed_column_when_parsed_then_rejected() {
    let payload = json!({"columns": [{"name": "no id"}], "tasks": []});
    assert_that!(parse_board(BoardId(1), payload), err(anything()));
}

#[test]
fn given_null_tasks_when_parsed_then_empty() {
    let payload = json!({"columns": [{"id": 1, "name": "Todo"}], "tasks": null});
    let result = parse_board(BoardId(1), payload);
    assert_that!(result, ok(anything()));
    assert!(result.unwrap().tasks.is_empty());
}

#[test]
fn given_task_with_unknown_column_when_parsed_and_built_then_not_rendered() {
    // Given
    let payload = json!({
        "columns": [{"id": 1, "name": "Todo"}],
        "tasks": [
            {"id": 1, "title": "placed", "column_id": 1},
            {"id": 2, "title": "stray", "column_id": 999}
        ]
    });

    // When
    let view = build_view(&parse_board(BoardId(1), payload).unwrap());

    // Then
    assert_that!(view.task_count(), eq(1));
    assert!(view.find_task(TaskId(2)).is_none());
    assert_that!(view.groups[0].column_id, eq(ColumnId(1)));
}
