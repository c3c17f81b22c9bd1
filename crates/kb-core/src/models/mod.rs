pub mod board;
pub mod board_payload;
pub mod column;
pub mod ids;
pub mod message;
pub mod order;
pub mod priority;
pub mod proposal;
pub mod task;
pub mod user;
pub mod wire;
