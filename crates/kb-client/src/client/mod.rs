pub(crate) mod client;
pub(crate) mod error;

pub use client::{Client, LoginResponse, OrderScope, ProposalAction};
pub use error::{ClientError, Result as ClientResult};
