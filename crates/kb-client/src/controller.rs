//! Owner of one board page: loads the board, drives column drags and task
//! moves against the remote store, and reports every result as a notice.

use crate::{BoardStore, ClientError, Notice, Notifier};

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use kb_core::{
    Board, BoardId, BoardUpdate, BoardView, ColumnId, CoreError, DoneColumnMatcher, NewTask,
    ReorderBuffer, Result as CoreResult, TaskId, build_view,
};
use log::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum BoardState {
    Loading,
    Ready(BoardView),
    /// Missing or forbidden board; the page shows a fallback instead
    Unavailable { message: String },
}

/// What an operation ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do, no remote call made
    Skipped,
    /// Remote call succeeded
    Applied,
    /// Input rejected locally, no remote call made
    Invalid,
    /// Remote call failed
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Skipped => "skipped",
            Outcome::Applied => "applied",
            Outcome::Invalid => "invalid",
            Outcome::Failed => "failed",
        }
    }
}

/// Tasks with a move in flight, shareable with whoever renders them
#[derive(Debug, Clone, Default)]
pub struct PendingTasks(Arc<Mutex<HashSet<TaskId>>>);

impl PendingTasks {
    pub fn contains(&self, id: TaskId) -> bool {
        self.0.lock().map(|set| set.contains(&id)).unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().map(|set| set.is_empty()).unwrap_or(true)
    }

    fn insert(&self, id: TaskId) -> bool {
        self.0.lock().map(|mut set| set.insert(id)).unwrap_or(false)
    }

    fn remove(&self, id: TaskId) {
        if let Ok(mut set) = self.0.lock() {
            set.remove(&id);
        }
    }
}

pub struct BoardController<S: BoardStore + ?Sized, N: Notifier + ?Sized> {
    board_id: BoardId,
    store: Arc<S>,
    notifier: Arc<N>,
    done_columns: DoneColumnMatcher,
    board: Option<Board>,
    state: BoardState,
    reorder: ReorderBuffer,
    pending: PendingTasks,
}

impl<S: BoardStore + ?Sized, N: Notifier + ?Sized> BoardController<S, N> {
    pub fn new(board_id: BoardId, store: Arc<S>, notifier: Arc<N>) -> Self {
        Self::with_done_columns(board_id, store, notifier, DoneColumnMatcher::default())
    }

    pub fn with_done_columns(
        board_id: BoardId,
        store: Arc<S>,
        notifier: Arc<N>,
        done_columns: DoneColumnMatcher,
    ) -> Self {
        Self {
            board_id,
            store,
            notifier,
            done_columns,
            board: None,
            state: BoardState::Loading,
            reorder: ReorderBuffer::new(),
            pending: PendingTasks::default(),
        }
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Last board received from the store
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// The grouping currently on screen, optimistic order included
    pub fn view(&self) -> Option<&BoardView> {
        match &self.state {
            BoardState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn is_pending(&self, task_id: TaskId) -> bool {
        self.pending.contains(task_id)
    }

    pub fn pending_tasks(&self) -> PendingTasks {
        self.pending.clone()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetch the board and rebuild the view
    pub async fn load(&mut self) -> Outcome {
        match self.store.get_board(self.board_id).await {
            Ok(board) => {
                self.replace_board(board);
                Outcome::Applied
            }
            Err(e) if e.is_unavailable() => {
                warn!("Board {} unavailable: {}", self.board_id, e.user_message());
                self.board = None;
                self.state = BoardState::Unavailable {
                    message: e.user_message(),
                };
                Outcome::Failed
            }
            Err(e) => {
                self.notify_failure("Failed to load board", &e);
                Outcome::Failed
            }
        }
    }

    fn replace_board(&mut self, board: Board) {
        let view = build_view(&board);
        debug!(
            "Board {} rebuilt: {} columns, {} tasks shown",
            self.board_id,
            view.groups.len(),
            view.task_count()
        );
        self.board = Some(board);
        self.state = BoardState::Ready(view);
    }

    // =========================================================================
    // Column drag
    // =========================================================================

    /// Start a drag gesture on the current column order
    #[track_caller]
    pub fn begin_column_drag(&mut self) -> CoreResult<()> {
        let order = match self.view() {
            Some(view) => view.column_order(),
            None => return Err(CoreError::validation("board", "Board is not loaded")),
        };
        self.reorder.begin(order)?;
        debug!("Column drag started on board {}", self.board_id);
        Ok(())
    }

    /// Apply one hover step and show the result immediately
    pub fn hover_column(&mut self, from: usize, to: usize) -> CoreResult<()> {
        let order = self.reorder.hover(from, to)?.to_vec();
        self.show_order(&order);
        Ok(())
    }

    /// Abandon the gesture and put the original order back
    pub fn cancel_column_drag(&mut self) -> CoreResult<()> {
        let snapshot = self.reorder.cancel()?;
        self.show_order(&snapshot);
        debug!("Column drag cancelled on board {}", self.board_id);
        Ok(())
    }

    /// Finish the gesture: persist the order if it changed.
    ///
    /// A failed write keeps the optimistic order on screen.
    pub async fn end_column_drag(&mut self) -> CoreResult<Outcome> {
        let Some(positions) = self.reorder.finish()? else {
            debug!("Column drag ended without changes");
            return Ok(Outcome::Skipped);
        };

        match self.store.reorder_columns(&positions).await {
            Ok(()) => {
                info!(
                    "Saved order of {} columns on board {}",
                    positions.len(),
                    self.board_id
                );
                self.load().await;
                self.notifier.notify(Notice::success("Column order saved"));
                Ok(Outcome::Applied)
            }
            Err(e) => {
                self.notify_failure("Failed to reorder columns", &e);
                Ok(Outcome::Failed)
            }
        }
    }

    fn show_order(&mut self, order: &[ColumnId]) {
        if let BoardState::Ready(view) = &mut self.state {
            view.apply_order(order);
        }
    }

    // =========================================================================
    // Task placement
    // =========================================================================

    /// Move a task into `target`; the view changes only after the store answers
    pub async fn move_task(&mut self, task_id: TaskId, target: ColumnId) -> Outcome {
        let Some(task) = self
            .board
            .as_ref()
            .and_then(|board| board.tasks.iter().find(|task| task.id == task_id))
        else {
            warn!("Task {} is not on board {}", task_id, self.board_id);
            return Outcome::Skipped;
        };

        if task.column_id == Some(target) {
            debug!("Task {} already in column {}", task_id, target);
            return Outcome::Skipped;
        }

        let title = task.title.clone();
        if !self.pending.insert(task_id) {
            debug!("Task {} already moving", task_id);
            return Outcome::Skipped;
        }

        let result = self.store.update_task_status(task_id, target).await;
        self.pending.remove(task_id);

        match result {
            Ok(_) => {
                info!("Task {} moved to column {}", task_id, target);
                self.load().await;

                let column_name = self.column_name(target).unwrap_or_default();
                let notice = if self.done_columns.is_done(&column_name) {
                    Notice::success(format!("\"{}\" moved to done", title))
                } else {
                    Notice::info(format!("\"{}\" status updated", title))
                };
                self.notifier.notify(notice);
                Outcome::Applied
            }
            Err(e) => {
                self.notify_failure("Failed to move task", &e);
                Outcome::Failed
            }
        }
    }

    fn column_name(&self, id: ColumnId) -> Option<String> {
        self.board
            .as_ref()?
            .columns
            .iter()
            .find(|column| column.id == id)
            .map(|column| column.name.clone())
    }

    // =========================================================================
    // Board editing
    // =========================================================================

    pub async fn create_column(&mut self, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return self.reject(CoreError::validation("name", "Column name must not be empty"));
        }

        let result = self.store.create_column(self.board_id, name).await;
        self.settle(
            result,
            format!("Column \"{}\" created", name),
            "Failed to create column",
        )
        .await
    }

    pub async fn delete_column(&mut self, id: ColumnId) -> Outcome {
        let result = self.store.delete_column(id).await;
        self.settle(result, "Column deleted".to_string(), "Failed to delete column")
            .await
    }

    pub async fn create_task(&mut self, task: NewTask) -> Outcome {
        if let Err(e) = task.validate() {
            return self.reject(e);
        }

        let result = self.store.create_task(&task).await;
        self.settle(
            result,
            format!("Task \"{}\" created", task.title.trim()),
            "Failed to create task",
        )
        .await
    }

    pub async fn delete_task(&mut self, id: TaskId) -> Outcome {
        let result = self.store.delete_task(id).await;
        self.settle(result, "Task deleted".to_string(), "Failed to delete task")
            .await
    }

    pub async fn update_settings(&mut self, update: BoardUpdate) -> Outcome {
        if let Err(e) = update.validate() {
            return self.reject(e);
        }

        let result = self.store.update_board(self.board_id, &update).await;
        self.settle(
            result,
            "Board settings saved".to_string(),
            "Failed to save board settings",
        )
        .await
    }

    /// Refetch after a successful mutation, or report the failure
    async fn settle<T>(
        &mut self,
        result: Result<T, ClientError>,
        success: String,
        failure: &str,
    ) -> Outcome {
        match result {
            Ok(_) => {
                info!("{} (board {})", success, self.board_id);
                self.load().await;
                self.notifier.notify(Notice::success(success));
                Outcome::Applied
            }
            Err(e) => {
                self.notify_failure(failure, &e);
                Outcome::Failed
            }
        }
    }

    fn reject(&self, error: CoreError) -> Outcome {
        debug!("Rejected input: {}", error);
        self.notifier.notify(Notice::error(error.user_message()));
        Outcome::Invalid
    }

    fn notify_failure(&self, context: &str, error: &ClientError) {
        warn!("{}: {}", context, error);
        self.notifier
            .notify(Notice::error(format!("{}: {}", context, error.user_message())));
    }
}
