//! Render-ready grouping of a board's tasks by column.
//!
//! The view is always rebuilt from the flat `columns` and `tasks` lists; it is
//! never patched in place except for the column order shown during a drag.

use crate::{Board, BoardId, ColumnId, Task, TaskId};

use std::collections::HashMap;

/// One column with the tasks placed in it
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub column_id: ColumnId,
    pub name: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub board_id: BoardId,
    pub title: String,
    pub description: Option<String>,
    pub groups: Vec<ColumnGroup>,
}

/// Group the board's tasks under their columns, in column order.
///
/// Tasks without a column, or whose column is not on this board, are left out.
pub fn build_view(board: &Board) -> BoardView {
    let mut tasks_by_column: HashMap<ColumnId, Vec<Task>> = HashMap::new();
    for task in &board.tasks {
        if let Some(column_id) = task.column_id {
            tasks_by_column
                .entry(column_id)
                .or_default()
                .push(task.clone());
        }
    }

    let groups = board
        .columns
        .iter()
        .map(|column| ColumnGroup {
            column_id: column.id,
            name: column.name.clone(),
            tasks: tasks_by_column.remove(&column.id).unwrap_or_default(),
        })
        .collect();

    let orphaned: usize = tasks_by_column.values().map(Vec::len).sum();
    if orphaned > 0 {
        log::debug!(
            "Board {}: {} task(s) reference unknown columns and are hidden",
            board.id,
            orphaned
        );
    }

    BoardView {
        board_id: board.id,
        title: board.title.clone(),
        description: board.description.clone(),
        groups,
    }
}

impl BoardView {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn column_order(&self) -> Vec<ColumnId> {
        self.groups.iter().map(|group| group.column_id).collect()
    }

    pub fn group(&self, column_id: ColumnId) -> Option<&ColumnGroup> {
        self.groups.iter().find(|group| group.column_id == column_id)
    }

    /// Locate a task and the column group it is shown in
    pub fn find_task(&self, task_id: TaskId) -> Option<(&ColumnGroup, &Task)> {
        self.groups.iter().find_map(|group| {
            group
                .tasks
                .iter()
                .find(|task| task.id == task_id)
                .map(|task| (group, task))
        })
    }

    pub fn task_count(&self) -> usize {
        self.groups.iter().map(|group| group.tasks.len()).sum()
    }

    /// Rearrange groups to follow `order`.
    ///
    /// Groups missing from `order` keep their relative order after the listed
    /// ones; ids in `order` that have no group are ignored.
    pub fn apply_order(&mut self, order: &[ColumnId]) {
        let rank: HashMap<ColumnId, usize> = order
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();
        self.groups
            .sort_by_key(|group| rank.get(&group.column_id).copied().unwrap_or(usize::MAX));
    }
}
