mod board_payload;
mod order;
mod priority;
mod proposal;
mod task;
