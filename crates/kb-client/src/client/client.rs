use crate::{ClientError, ClientResult, CredentialStore};

use std::sync::Arc;
use std::time::Duration;

use kb_core::{
    Board, BoardId, BoardUpdate, Column, ColumnId, ColumnPosition, Message, NewBoard, NewMessage,
    NewOrder, NewProposal, NewTask, Order, OrderAction, OrderId, OrderUpdate, Proposal,
    ProposalId, Task, TaskId, User, parse_board,
};
use log::{debug, warn};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Which orders `list_orders` asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderScope {
    /// Every order (admins and executors)
    #[default]
    All,
    /// Orders still taking proposals
    Open,
    /// Orders the current user created or was assigned
    Mine,
}

impl OrderScope {
    fn path(&self) -> &'static str {
        match self {
            Self::All => "/orders",
            Self::Open => "/orders/open",
            Self::Mine => "/orders/my",
        }
    }
}

/// Proposal actions with a dedicated endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalAction {
    Accept,
    Reject,
    Withdraw,
}

impl ProposalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Withdraw => "withdraw",
        }
    }
}

/// HTTP client for the kanban REST API
pub struct Client {
    pub base_url: String,
    credentials: Arc<dyn CredentialStore>,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "http://127.0.0.1:8000/api/v1")
    /// * `credentials` - Store consulted for the bearer token on every request
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client: ReqwestClient::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Build a request with the bearer token when one is stored
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(stored) = self.credentials.get() {
            req = req.bearer_auth(stored.token);
        }

        req
    }

    /// Execute request and handle errors.
    ///
    /// Empty success bodies come back as `Value::Null`. A 401 clears the
    /// credential store before the error is returned.
    async fn execute(&self, req: reqwest::RequestBuilder) -> ClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        let message = error_message(status, &text);
        warn!("Request failed with {}: {}", status.as_u16(), message);

        if status == StatusCode::UNAUTHORIZED
            && let Err(e) = self.credentials.remove()
        {
            warn!("Failed to clear credentials after 401: {}", e);
        }

        Err(ClientError::from_status(status.as_u16(), message))
    }

    /// Execute and deserialize the body into `T`
    async fn fetch<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let body = self.execute(req).await?;
        Ok(serde_json::from_value(body)?)
    }

    // =========================================================================
    // Board Operations
    // =========================================================================

    /// List boards visible to the current user
    pub async fn list_boards(&self) -> ClientResult<Vec<Board>> {
        let req = self.request(Method::GET, "/boards");
        self.fetch(req).await
    }

    /// Get a board with its columns and tasks, through the parsing boundary
    pub async fn get_board(&self, id: BoardId) -> ClientResult<Board> {
        let req = self.request(Method::GET, &format!("/boards/{}", id));
        let body = self.execute(req).await?;
        let board = parse_board(id, body)?;
        debug!(
            "Fetched board {} ({} columns, {} tasks)",
            id,
            board.columns.len(),
            board.tasks.len()
        );
        Ok(board)
    }

    /// Create a new board
    pub async fn create_board(&self, board: &NewBoard) -> ClientResult<Board> {
        let req = self.request(Method::POST, "/boards/").json(board);
        self.fetch(req).await
    }

    /// Update board settings
    pub async fn update_board(&self, id: BoardId, update: &BoardUpdate) -> ClientResult<Board> {
        let req = self
            .request(Method::PUT, &format!("/boards/{}", id))
            .json(update);
        self.fetch(req).await
    }

    /// Delete a board
    pub async fn delete_board(&self, id: BoardId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/boards/{}", id));
        self.execute(req).await?;
        Ok(())
    }

    // =========================================================================
    // Column Operations
    // =========================================================================

    /// Create a column at the end of a board
    pub async fn create_column(&self, board_id: BoardId, name: &str) -> ClientResult<Column> {
        #[derive(Serialize)]
        struct CreateColumnRequest<'a> {
            name: &'a str,
            board_id: BoardId,
        }

        let body = CreateColumnRequest { name, board_id };
        let req = self.request(Method::POST, "/columns").json(&body);
        self.fetch(req).await
    }

    /// Delete a column
    pub async fn delete_column(&self, id: ColumnId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/columns/{}", id));
        self.execute(req).await?;
        Ok(())
    }

    /// Persist a full column order
    pub async fn reorder_columns(&self, positions: &[ColumnPosition]) -> ClientResult<()> {
        let req = self
            .request(Method::PATCH, "/columns/reorder")
            .json(positions);
        self.execute(req).await?;
        Ok(())
    }

    // =========================================================================
    // Task Operations
    // =========================================================================

    /// Create a task
    pub async fn create_task(&self, task: &NewTask) -> ClientResult<Task> {
        let req = self.request(Method::POST, "/tasks").json(task);
        self.fetch(req).await
    }

    /// Move a task into another column
    pub async fn update_task_status(&self, id: TaskId, column_id: ColumnId) -> ClientResult<Task> {
        #[derive(Serialize)]
        struct StatusRequest {
            column_id: ColumnId,
        }

        let req = self
            .request(Method::PATCH, &format!("/tasks/{}/status", id))
            .json(&StatusRequest { column_id });
        self.fetch(req).await
    }

    /// Delete a task
    pub async fn delete_task(&self, id: TaskId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/tasks/{}", id));
        self.execute(req).await?;
        Ok(())
    }

    // =========================================================================
    // Order Operations
    // =========================================================================

    pub async fn list_orders(&self, scope: OrderScope) -> ClientResult<Vec<Order>> {
        let req = self.request(Method::GET, scope.path());
        self.fetch(req).await
    }

    /// Get an order with its proposals
    pub async fn get_order(&self, id: OrderId) -> ClientResult<Order> {
        let req = self.request(Method::GET, &format!("/orders/{}", id));
        self.fetch(req).await
    }

    /// Publish an order; it starts out open
    pub async fn create_order(&self, order: &NewOrder) -> ClientResult<Order> {
        let req = self.request(Method::POST, "/orders/").json(order);
        self.fetch(req).await
    }

    pub async fn update_order(&self, id: OrderId, update: &OrderUpdate) -> ClientResult<Order> {
        let req = self
            .request(Method::PUT, &format!("/orders/{}", id))
            .json(update);
        self.fetch(req).await
    }

    pub async fn delete_order(&self, id: OrderId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/orders/{}", id));
        self.execute(req).await?;
        Ok(())
    }

    /// Complete, cancel or restore an order.
    ///
    /// The current status is fetched first and the transition checked
    /// locally, so a refused transition never reaches the write endpoint.
    pub async fn change_order_status(
        &self,
        id: OrderId,
        action: OrderAction,
    ) -> ClientResult<Order> {
        let current = self.get_order(id).await?;
        let next = current.status.apply(action)?;
        debug!(
            "Order {}: {} -> {} ({})",
            id,
            current.status,
            next,
            action.as_str()
        );

        let req = self.request(Method::POST, &format!("/orders/{}/{}", id, action.as_str()));
        self.fetch(req).await
    }

    // =========================================================================
    // Proposal Operations
    // =========================================================================

    /// Bid on an order
    pub async fn create_proposal(&self, proposal: &NewProposal) -> ClientResult<Proposal> {
        let req = self.request(Method::POST, "/proposals/").json(proposal);
        self.fetch(req).await
    }

    /// Proposals the current user has made
    pub async fn my_proposals(&self) -> ClientResult<Vec<Proposal>> {
        let req = self.request(Method::GET, "/proposals/my");
        self.fetch(req).await
    }

    /// Proposals made on one order (its owner or an admin)
    pub async fn proposals_for_order(&self, order_id: OrderId) -> ClientResult<Vec<Proposal>> {
        let req = self.request(Method::GET, &format!("/proposals/order/{}", order_id));
        self.fetch(req).await
    }

    pub async fn get_proposal(&self, id: ProposalId) -> ClientResult<Proposal> {
        let req = self.request(Method::GET, &format!("/proposals/{}", id));
        self.fetch(req).await
    }

    /// Accept, reject or withdraw a proposal.
    ///
    /// Accepting also rejects the order's other pending proposals on the
    /// server side.
    pub async fn decide_proposal(
        &self,
        id: ProposalId,
        action: ProposalAction,
    ) -> ClientResult<Proposal> {
        let req = self.request(
            Method::POST,
            &format!("/proposals/{}/{}", id, action.as_str()),
        );
        self.fetch(req).await
    }

    pub async fn delete_proposal(&self, id: ProposalId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/proposals/{}", id));
        self.execute(req).await?;
        Ok(())
    }

    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Exchange username and password for a token
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        let req = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest { username, password });
        self.fetch(req).await
    }

    /// User behind the stored token
    pub async fn me(&self) -> ClientResult<User> {
        let req = self.request(Method::GET, "/auth/me");
        self.fetch(req).await
    }

    // =========================================================================
    // Message Operations
    // =========================================================================

    /// Chat history of an order, oldest first
    pub async fn messages_by_order(&self, order_id: OrderId) -> ClientResult<Vec<Message>> {
        let req = self.request(Method::GET, &format!("/messages/order/{}", order_id));
        self.fetch(req).await
    }

    /// Send a chat message
    pub async fn send_message(&self, message: &NewMessage) -> ClientResult<Message> {
        let req = self.request(Method::POST, "/messages").json(message);
        self.fetch(req).await
    }

    /// Mark every message of an order as read
    pub async fn mark_order_read(&self, order_id: OrderId) -> ClientResult<()> {
        let req = self.request(
            Method::POST,
            &format!("/messages/order/{}/read", order_id),
        );
        self.execute(req).await?;
        Ok(())
    }
}

/// Pull the most useful text out of an error body.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}` and
/// `{"detail": {...}}`; anything else falls back to the raw body or the
/// status reason.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        } else {
            trimmed.to_string()
        }
    };

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                fallback()
            } else {
                messages.join("; ")
            }
        }
        Some(Value::Object(detail)) => detail
            .get("msg")
            .or_else(|| detail.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Value::Object(detail.clone()).to_string()),
        _ => fallback(),
    }
}
