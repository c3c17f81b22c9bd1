use crate::models::wire;
use crate::{CoreError, OrderId, ProposalId, Result as CoreResult, UserId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An executor's bid on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub order_id: OrderId,
    #[serde(default, alias = "user_id")]
    pub executor_id: Option<UserId>,
    #[serde(default, alias = "message")]
    pub description: String,
    pub price: f64,
    /// Days
    #[serde(default)]
    pub estimated_duration: Option<i64>,
    #[serde(default)]
    pub status: ProposalStatus,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProposal {
    pub order_id: OrderId,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<i64>,
}

impl NewProposal {
    /// Build a proposal, trimming the pitch and checking price and duration
    #[track_caller]
    pub fn new(
        order_id: OrderId,
        description: &str,
        price: f64,
        estimated_duration: Option<i64>,
    ) -> CoreResult<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::validation(
                "description",
                "Proposal description must not be empty",
            ));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(CoreError::validation(
                "price",
                format!("Price must be positive, got {price}"),
            ));
        }
        if let Some(days) = estimated_duration
            && days <= 0
        {
            return Err(CoreError::validation(
                "estimated_duration",
                format!("Estimated duration must be positive, got {days}"),
            ));
        }

        Ok(Self {
            order_id,
            description: description.to_string(),
            price,
            estimated_duration,
        })
    }
}

/// Mirror an acceptance locally: the chosen proposal is accepted and every
/// other pending proposal on the same order is rejected.
pub fn accept_among(proposals: &mut [Proposal], accepted: ProposalId) {
    let Some(order_id) = proposals
        .iter()
        .find(|proposal| proposal.id == accepted)
        .map(|proposal| proposal.order_id)
    else {
        return;
    };

    for proposal in proposals.iter_mut().filter(|p| p.order_id == order_id) {
        if proposal.id == accepted {
            proposal.status = ProposalStatus::Accepted;
        } else if proposal.status == ProposalStatus::Pending {
            proposal.status = ProposalStatus::Rejected;
        }
    }
}
