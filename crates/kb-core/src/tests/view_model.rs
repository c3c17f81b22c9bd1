use crate::tests::board_with;
use crate::{Board, BoardId, ColumnId, TaskId, build_view};

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_empty_board_when_built_then_no_groups() {
    // Given
    let board = Board::new(BoardId(1), "Empty");

    // When
    let view = build_view(&board);

    // Then
    assert!(view.is_empty());
    assert_that!(view.task_count(), eq(0));
}

#[test]
fn given_columns_without_tasks_when_built_then_empty_groups_in_order() {
    // Given
    let board = board_with(&[(3, "C"), (1, "A"), (2, "B")], &[]);

    // When
    let view = build_view(&board);

    // Then
    assert_eq!(view.column_order(), vec![ColumnId(3), ColumnId(1), ColumnId(2)]);
    assert!(view.groups.iter().all(|group| group.tasks.is_empty()));
}

#[test]
fn given_tasks_when_built_then_grouped_by_column_in_input_order() {
    // Given
    let board = board_with(
        &[(1, "Todo"), (2, "Doing")],
        &[(10, Some(2)), (11, Some(1)), (12, Some(2))],
    );

    // When
    let view = build_view(&board);

    // Then
    let doing = view.group(ColumnId(2)).unwrap();
    let ids: Vec<TaskId> = doing.tasks.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![TaskId(10), TaskId(12)]);
    assert_that!(view.group(ColumnId(1)).unwrap().tasks.len(), eq(1));
    assert_that!(view.group(ColumnId(1)).unwrap().name.as_str(), eq("Todo"));
}

#[test]
fn given_unplaced_and_orphaned_tasks_when_built_then_omitted() {
    // Given
    let board = board_with(&[(1, "Todo")], &[(10, None), (11, Some(99)), (12, Some(1))]);

    // When
    let view = build_view(&board);

    // Then
    assert_that!(view.task_count(), eq(1));
    assert!(view.find_task(TaskId(10)).is_none());
    assert!(view.find_task(TaskId(11)).is_none());
    let (group, task) = view.find_task(TaskId(12)).unwrap();
    assert_that!(group.column_id, eq(ColumnId(1)));
    assert_that!(task.id, eq(TaskId(12)));
}

#[test]
fn given_view_when_apply_order_then_groups_follow_order() {
    // Given
    let board = board_with(&[(1, "A"), (2, "B"), (3, "C")], &[(10, Some(1))]);
    let mut view = build_view(&board);

    // When
    view.apply_order(&[ColumnId(2), ColumnId(3), ColumnId(1)]);

    // Then
    assert_eq!(view.column_order(), vec![ColumnId(2), ColumnId(3), ColumnId(1)]);
    assert_that!(view.groups[2].tasks.len(), eq(1));
}

#[test]
fn given_partial_order_when_apply_order_then_unlisted_groups_trail() {
    let board = board_with(&[(1, "A"), (2, "B"), (3, "C")], &[]);
    let mut view = build_view(&board);

    view.apply_order(&[ColumnId(3), ColumnId(42)]);

    assert_eq!(view.column_order(), vec![ColumnId(3), ColumnId(1), ColumnId(2)]);
}
