//! kb-client library
//!
//! REST client for the kanban and order API together with the client-side
//! state that sits on top of it: session, board controller and chat poller.

pub mod chat;
pub(crate) mod client;
pub mod controller;
pub mod credentials;
pub mod logger;
pub mod notifier;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use chat::{ChatPoller, ChatUpdate, counterpart};
pub use client::{
    Client, ClientError, ClientResult, LoginResponse, OrderScope, ProposalAction,
};
pub use controller::{BoardController, BoardState, Outcome, PendingTasks};
pub use credentials::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredCredentials,
};
pub use notifier::{LogNotifier, Notice, NoticeLevel, Notifier, RecordingNotifier};
pub use session::Session;
pub use store::{BoardStore, MessageSource};
