use crate::models::wire;
use crate::{CoreError, MessageId, OrderId, Result as CoreResult, UserId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat message attached to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub order_id: OrderId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(deserialize_with = "wire::required_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub receiver_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMessage {
    pub order_id: OrderId,
    pub receiver_id: UserId,
    pub content: String,
}

impl NewMessage {
    /// Build a message, trimming the content and refusing blank text
    #[track_caller]
    pub fn new(order_id: OrderId, receiver_id: UserId, content: &str) -> CoreResult<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CoreError::validation("content", "Message must not be empty"));
        }
        Ok(Self {
            order_id,
            receiver_id,
            content: content.to_string(),
        })
    }
}
