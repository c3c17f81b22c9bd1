use crate::models::wire;
use crate::{BoardId, Column, CoreError, Result as CoreResult, Task, UserId};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "wire::default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub creator_id: Option<UserId>,
    #[serde(default = "wire::default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn new(id: BoardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            is_public: true,
            creator_id: None,
            is_active: true,
            columns: Vec::new(),
            tasks: Vec::new(),
        }
    }
}

/// Input for creating a board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBoard {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_public: bool,
}

impl NewBoard {
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title", "Board title must not be empty"));
        }
        Ok(())
    }
}

/// Settings update; absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl BoardUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_public.is_none()
    }

    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if self.is_empty() {
            return Err(CoreError::validation("board", "Nothing to update"));
        }
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err(CoreError::validation("title", "Board title must not be empty"));
        }
        Ok(())
    }
}
