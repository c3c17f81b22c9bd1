mod logger;

use crate::{BoardStore, ClientError, ClientResult, MessageSource, PendingTasks};

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use kb_core::{
    Board, BoardId, BoardUpdate, Column, ColumnId, ColumnPosition, Message, NewTask, OrderId,
    Task, TaskId,
};
use serde_json::json;

// =========================================================================
// In-memory board store
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    GetBoard,
    UpdateBoard,
    CreateColumn(String),
    DeleteColumn(ColumnId),
    Reorder(Vec<ColumnPosition>),
    CreateTask(String),
    UpdateTaskStatus(TaskId, ColumnId),
    DeleteTask(TaskId),
}

/// Board store that applies mutations to an in-memory board and records calls
#[derive(Default)]
pub(crate) struct RecordingStore {
    board: Mutex<Option<Board>>,
    calls: Mutex<Vec<Call>>,
    get_status: Mutex<Option<u16>>,
    fail_writes: Mutex<Option<u16>>,
    pending: Mutex<Option<PendingTasks>>,
    pending_during_move: Mutex<Vec<bool>>,
    placement: Mutex<Option<Placement>>,
}

/// Where the service really puts a moved task
#[derive(Debug, Clone, Copy)]
pub(crate) enum Placement {
    Column(ColumnId),
    Removed,
}

impl RecordingStore {
    pub(crate) fn with_board(board: Board) -> Self {
        let store = Self::default();
        *store.board.lock().unwrap() = Some(board);
        store
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than board fetches
    pub(crate) fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| *call != Call::GetBoard)
            .collect()
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == Call::GetBoard)
            .count()
    }

    pub(crate) fn fail_board_fetch(&self, status: u16) {
        *self.get_status.lock().unwrap() = Some(status);
    }

    pub(crate) fn fail_writes(&self, status: u16) {
        *self.fail_writes.lock().unwrap() = Some(status);
    }

    pub(crate) fn watch_pending(&self, pending: PendingTasks) {
        *self.pending.lock().unwrap() = Some(pending);
    }

    /// Answer status changes as requested but store the task per `placement`
    pub(crate) fn place_moves(&self, placement: Placement) {
        *self.placement.lock().unwrap() = Some(placement);
    }

    pub(crate) fn pending_during_move(&self) -> Vec<bool> {
        self.pending_during_move.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self) -> ClientResult<()> {
        match *self.fail_writes.lock().unwrap() {
            Some(status) => Err(ClientError::from_status(
                status,
                "Server rejected the change".to_string(),
            )),
            None => Ok(()),
        }
    }

    fn edit<T>(&self, f: impl FnOnce(&mut Board) -> T) -> T {
        let mut board = self.board.lock().unwrap();
        f(board.as_mut().expect("store has a board"))
    }
}

#[async_trait]
impl BoardStore for RecordingStore {
    async fn get_board(&self, id: BoardId) -> ClientResult<Board> {
        self.record(Call::GetBoard);
        if let Some(status) = *self.get_status.lock().unwrap() {
            return Err(ClientError::from_status(status, format!("Board {} failed", id)));
        }
        Ok(self.board.lock().unwrap().clone().expect("store has a board"))
    }

    async fn update_board(&self, _id: BoardId, update: &BoardUpdate) -> ClientResult<Board> {
        self.record(Call::UpdateBoard);
        self.write_result()?;
        Ok(self.edit(|board| {
            if let Some(title) = &update.title {
                board.title = title.clone();
            }
            board.clone()
        }))
    }

    async fn create_column(&self, board_id: BoardId, name: &str) -> ClientResult<Column> {
        self.record(Call::CreateColumn(name.to_string()));
        self.write_result()?;
        Ok(self.edit(|board| {
            let id = ColumnId(board.columns.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1);
            let mut column = Column::new(id, name, board.columns.len() as i32);
            column.board_id = Some(board_id);
            board.columns.push(column.clone());
            column
        }))
    }

    async fn delete_column(&self, id: ColumnId) -> ClientResult<()> {
        self.record(Call::DeleteColumn(id));
        self.write_result()?;
        self.edit(|board| board.columns.retain(|column| column.id != id));
        Ok(())
    }

    async fn reorder_columns(&self, positions: &[ColumnPosition]) -> ClientResult<()> {
        self.record(Call::Reorder(positions.to_vec()));
        self.write_result()?;
        self.edit(|board| {
            for column in &mut board.columns {
                if let Some(position) = positions.iter().find(|p| p.id == column.id) {
                    column.position = position.order_index;
                }
            }
            board.columns.sort_by_key(|column| column.position);
        });
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> ClientResult<Task> {
        self.record(Call::CreateTask(task.title.clone()));
        self.write_result()?;
        Ok(self.edit(|board| {
            let id = TaskId(board.tasks.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1);
            let created = Task::new(id, task.title.clone(), Some(task.column_id));
            board.tasks.push(created.clone());
            created
        }))
    }

    async fn update_task_status(&self, id: TaskId, column_id: ColumnId) -> ClientResult<Task> {
        self.record(Call::UpdateTaskStatus(id, column_id));
        if let Some(pending) = self.pending.lock().unwrap().as_ref() {
            self.pending_during_move
                .lock()
                .unwrap()
                .push(pending.contains(id));
        }
        self.write_result()?;
        let placement = *self.placement.lock().unwrap();
        Ok(self.edit(|board| {
            let task = board
                .tasks
                .iter_mut()
                .find(|task| task.id == id)
                .expect("task exists");
            let mut answer = task.clone();
            answer.column_id = Some(column_id);

            match placement {
                None => task.column_id = Some(column_id),
                Some(Placement::Column(actual)) => task.column_id = Some(actual),
                Some(Placement::Removed) => board.tasks.retain(|task| task.id != id),
            }
            answer
        }))
    }

    async fn delete_task(&self, id: TaskId) -> ClientResult<()> {
        self.record(Call::DeleteTask(id));
        self.write_result()?;
        self.edit(|board| board.tasks.retain(|task| task.id != id));
        Ok(())
    }
}

// =========================================================================
// Scripted message source
// =========================================================================

/// Plays back scripted answers, then repeats the fallback forever
pub(crate) struct ScriptedSource {
    script: Mutex<VecDeque<ClientResult<Vec<Message>>>>,
    fallback: Vec<Message>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub(crate) fn new(script: Vec<ClientResult<Vec<Message>>>, fallback: Vec<Message>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageSource for ScriptedSource {
    async fn messages_by_order(&self, _order_id: OrderId) -> ClientResult<Vec<Message>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(answer) => answer,
            None => Ok(self.fallback.clone()),
        }
    }
}

pub(crate) fn message(id: i64, sender: i64, receiver: i64, content: &str) -> Message {
    serde_json::from_value(json!({
        "id": id,
        "order_id": 1,
        "sender_id": sender,
        "receiver_id": receiver,
        "content": content,
        "created_at": "2025-01-01T10:00:00"
    }))
    .unwrap()
}

/// Board with columns A(1), B(2) "Готово", C(3) and tasks t1 in A, t2 in C
pub(crate) fn sample_board() -> Board {
    let mut board = Board::new(BoardId(1), "Sprint");
    board.columns = vec![
        Column::new(ColumnId(1), "A", 0),
        Column::new(ColumnId(2), "Готово", 1),
        Column::new(ColumnId(3), "C", 2),
    ];
    board.tasks = vec![
        Task::new(TaskId(1), "t1", Some(ColumnId(1))),
        Task::new(TaskId(2), "t2", Some(ColumnId(3))),
    ];
    board
}
