//! Remote board operations the controller depends on.

use crate::{Client, ClientResult};

use async_trait::async_trait;
use kb_core::{
    Board, BoardId, BoardUpdate, Column, ColumnId, ColumnPosition, Message, NewTask, OrderId,
    Task, TaskId,
};

/// Authoritative owner of boards, columns and tasks
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn get_board(&self, id: BoardId) -> ClientResult<Board>;
    async fn update_board(&self, id: BoardId, update: &BoardUpdate) -> ClientResult<Board>;
    async fn create_column(&self, board_id: BoardId, name: &str) -> ClientResult<Column>;
    async fn delete_column(&self, id: ColumnId) -> ClientResult<()>;
    async fn reorder_columns(&self, positions: &[ColumnPosition]) -> ClientResult<()>;
    async fn create_task(&self, task: &NewTask) -> ClientResult<Task>;
    async fn update_task_status(&self, id: TaskId, column_id: ColumnId) -> ClientResult<Task>;
    async fn delete_task(&self, id: TaskId) -> ClientResult<()>;
}

/// Source of an order's chat history
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn messages_by_order(&self, order_id: OrderId) -> ClientResult<Vec<Message>>;
}

#[async_trait]
impl BoardStore for Client {
    async fn get_board(&self, id: BoardId) -> ClientResult<Board> {
        Client::get_board(self, id).await
    }

    async fn update_board(&self, id: BoardId, update: &BoardUpdate) -> ClientResult<Board> {
        Client::update_board(self, id, update).await
    }

    async fn create_column(&self, board_id: BoardId, name: &str) -> ClientResult<Column> {
        Client::create_column(self, board_id, name).await
    }

    async fn delete_column(&self, id: ColumnId) -> ClientResult<()> {
        Client::delete_column(self, id).await
    }

    async fn reorder_columns(&self, positions: &[ColumnPosition]) -> ClientResult<()> {
        Client::reorder_columns(self, positions).await
    }

    async fn create_task(&self, task: &NewTask) -> ClientResult<Task> {
        Client::create_task(self, task).await
    }

    async fn update_task_status(&self, id: TaskId, column_id: ColumnId) -> ClientResult<Task> {
        Client::update_task_status(self, id, column_id).await
    }

    async fn delete_task(&self, id: TaskId) -> ClientResult<()> {
        Client::delete_task(self, id).await
    }
}

#[async_trait]
impl MessageSource for Client {
    async fn messages_by_order(&self, order_id: OrderId) -> ClientResult<Vec<Message>> {
        Client::messages_by_order(self, order_id).await
    }
}
