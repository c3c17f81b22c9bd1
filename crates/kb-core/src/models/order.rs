use crate::models::wire;
use crate::{
    CoreError, OrderId, Priority, Proposal, ProposalStatus, Result as CoreResult, UserId,
};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Where an order is in its life.
///
/// ```text
/// Open --accept proposal--> InProgress --complete--> Completed
///   |                           |
///   +--------cancel-------------+--> Cancelled --restore--> Open
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Executors may only bid on open orders
    pub fn accepts_proposals(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Status an owner action leads to, or why it is refused
    #[track_caller]
    pub fn apply(self, action: OrderAction) -> CoreResult<Self> {
        let next = match (self, action) {
            (Self::InProgress, OrderAction::Complete) => Some(Self::Completed),
            (Self::Open | Self::InProgress, OrderAction::Cancel) => Some(Self::Cancelled),
            (Self::Cancelled, OrderAction::Restore) => Some(Self::Open),
            _ => None,
        };

        next.ok_or_else(|| CoreError::InvalidTransition {
            from: self.as_str().to_string(),
            action: action.as_str().to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(CoreError::InvalidStatus {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owner actions with a dedicated endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    Complete,
    Cancel,
    Restore,
}

impl OrderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Restore => "restore",
        }
    }
}

/// A freelance order, with its proposals when the service includes them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "wire::tags")]
    pub tags: Vec<String>,

    // People
    #[serde(default, alias = "customer_id")]
    pub creator_id: Option<UserId>,
    #[serde(default)]
    pub assigned_executor_id: Option<UserId>,

    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub proposals: Vec<Proposal>,
}

impl Order {
    pub fn pending_proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals
            .iter()
            .filter(|proposal| proposal.status == ProposalStatus::Pending)
    }

    pub fn accepted_proposal(&self) -> Option<&Proposal> {
        self.proposals
            .iter()
            .find(|proposal| proposal.status == ProposalStatus::Accepted)
    }
}

/// Input for publishing an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub deadline: DateTime<Utc>,
    #[serde(serialize_with = "wire::upper_priority")]
    pub priority: Priority,
    #[serde(serialize_with = "wire::joined_tags")]
    pub tags: Vec<String>,
}

impl NewOrder {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        budget: f64,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            budget,
            deadline,
            priority: Priority::default(),
            tags: Vec::new(),
        }
    }

    /// Reject input the service would refuse; `now` bounds the deadline.
    #[track_caller]
    pub fn validate(&self, now: DateTime<Utc>) -> CoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title", "Order title must not be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::validation(
                "description",
                "Order description must not be empty",
            ));
        }
        check_budget(self.budget)?;
        check_deadline(self.deadline, now)?;
        Ok(())
    }
}

/// Partial order edit; absent fields are left alone
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire::upper_priority_opt"
    )]
    pub priority: Option<Priority>,
}

impl OrderUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    #[track_caller]
    pub fn validate(&self, now: DateTime<Utc>) -> CoreResult<()> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err(CoreError::validation("title", "Order title must not be empty"));
        }
        if let Some(budget) = self.budget {
            check_budget(budget)?;
        }
        if let Some(deadline) = self.deadline {
            check_deadline(deadline, now)?;
        }
        Ok(())
    }
}

#[track_caller]
fn check_budget(budget: f64) -> CoreResult<()> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(CoreError::validation(
            "budget",
            format!("Budget must be positive, got {budget}"),
        ));
    }
    Ok(())
}

#[track_caller]
fn check_deadline(deadline: DateTime<Utc>, now: DateTime<Utc>) -> CoreResult<()> {
    if deadline <= now {
        return Err(CoreError::validation(
            "deadline",
            "Deadline must be in the future",
        ));
    }
    Ok(())
}
