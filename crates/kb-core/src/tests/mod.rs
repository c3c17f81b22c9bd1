mod models;
mod view_model;

use crate::{Board, BoardId, Column, ColumnId, Task, TaskId};

/// Board with the given `(id, name)` columns and `(task id, column id)` tasks
pub(crate) fn board_with(columns: &[(i64, &str)], tasks: &[(i64, Option<i64>)]) -> Board {
    let mut board = Board::new(BoardId(1), "Test board");
    board.columns = columns
        .iter()
        .enumerate()
        .map(|(index, (id, name))| Column::new(ColumnId(*id), *name, index as i32))
        .collect();
    board.tasks = tasks
        .iter()
        .map(|(id, column)| Task::new(TaskId(*id), format!("Task {id}"), column.map(ColumnId)))
        .collect();
    board
}
