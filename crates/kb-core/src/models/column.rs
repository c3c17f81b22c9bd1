use crate::{BoardId, ColumnId};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub board_id: Option<BoardId>,
    #[serde(rename = "order_index", alias = "order", default)]
    pub position: i32,
}

impl Column {
    pub fn new(id: ColumnId, name: impl Into<String>, position: i32) -> Self {
        Self {
            id,
            name: name.into(),
            board_id: None,
            position,
        }
    }
}

/// One entry of a reorder request: every column of the board gets one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPosition {
    pub id: ColumnId,
    pub order_index: i32,
}
