use crate::models::wire;
use crate::{BoardId, ColumnId, CoreError, Priority, Result as CoreResult, TaskId, UserId};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

const MIN_DUE_YEAR: i32 = 1900;
const MAX_DUE_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,

    // Placement
    #[serde(default)]
    pub column_id: Option<ColumnId>,
    #[serde(default)]
    pub board_id: Option<BoardId>,

    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "wire::tags")]
    pub tags: Vec<String>,

    // People
    #[serde(default)]
    pub assigned_to_id: Option<UserId>,
    #[serde(default)]
    pub creator_id: Option<UserId>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, column_id: Option<ColumnId>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            column_id,
            board_id: None,
            priority: Priority::default(),
            due_date: None,
            budget: None,
            tags: Vec::new(),
            assigned_to_id: None,
            creator_id: None,
        }
    }
}

/// Input for creating a task inside a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<UserId>,
}

impl NewTask {
    pub fn new(board_id: BoardId, column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            board_id,
            column_id,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due_date: None,
            budget: None,
            tags: Vec::new(),
            assigned_to_id: None,
        }
    }

    /// Reject input the service would refuse, before any request is made.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title", "Task title must not be empty"));
        }

        if let Some(budget) = self.budget
            && (!budget.is_finite() || budget < 0.0)
        {
            return Err(CoreError::validation(
                "budget",
                format!("Budget must be a non-negative number, got {budget}"),
            ));
        }

        if let Some(due) = self.due_date
            && !(MIN_DUE_YEAR..=MAX_DUE_YEAR).contains(&due.year())
        {
            return Err(CoreError::validation(
                "due_date",
                format!(
                    "Year {} is out of range ({}-{})",
                    due.year(),
                    MIN_DUE_YEAR,
                    MAX_DUE_YEAR
                ),
            ));
        }

        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(CoreError::validation("tags", "Tags must not be blank"));
        }

        Ok(())
    }
}
