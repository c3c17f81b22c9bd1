//! Client-side state core of the kanban board: typed models, the board
//! view-model builder, and the optimistic column reorder buffer. Also holds
//! the order and proposal models with the order status lifecycle.

pub mod done_column;
pub mod error;
pub mod models;
pub mod reorder;
pub mod view_model;

pub use done_column::{DEFAULT_DONE_KEYWORDS, DoneColumnMatcher};
pub use error::{CoreError, Result};
pub use models::board::{Board, BoardUpdate, NewBoard};
pub use models::board_payload::{parse_board, parse_task};
pub use models::column::{Column, ColumnPosition};
pub use models::ids::{BoardId, ColumnId, MessageId, OrderId, ProposalId, TaskId, UserId};
pub use models::message::{Message, NewMessage};
pub use models::order::{NewOrder, Order, OrderAction, OrderStatus, OrderUpdate};
pub use models::priority::Priority;
pub use models::proposal::{NewProposal, Proposal, ProposalStatus, accept_among};
pub use models::task::{NewTask, Task};
pub use models::user::User;
pub use models::wire::parse_timestamp;
pub use reorder::{GestureState, ReorderBuffer, dense_positions};
pub use view_model::{BoardView, ColumnGroup, build_view};

#[cfg(test)]
mod tests;
