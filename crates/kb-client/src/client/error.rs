use std::panic::Location;

use error_location::ErrorLocation;
use kb_core::CoreError;
use thiserror::Error;

/// Errors that can occur during API calls
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {message} (status: {status}) {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed response: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential store error: {message} {location}")]
    Credentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Setup error: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },
}

impl ClientError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        ClientError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        ClientError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Map a non-success status and its extracted message to an error
    #[track_caller]
    pub fn from_status(status: u16, message: String) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match status {
            401 => ClientError::Unauthorized { message, location },
            403 => ClientError::Forbidden { message, location },
            404 => ClientError::NotFound { message, location },
            _ => ClientError::Api {
                status,
                message,
                location,
            },
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        ClientError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode<S: Into<String>>(message: S) -> Self {
        ClientError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn credentials<S: Into<String>>(message: S) -> Self {
        ClientError::Credentials {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn setup<S: Into<String>>(message: S) -> Self {
        ClientError::Setup {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether the board behind the request cannot be shown to this user
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ClientError::NotFound { .. } | ClientError::Forbidden { .. }
        )
    }

    /// Best-effort human readable message, without source locations
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. }
            | ClientError::NotFound { message, .. }
            | ClientError::Forbidden { message, .. }
            | ClientError::Unauthorized { message, .. }
            | ClientError::Validation { message, .. }
            | ClientError::Decode { message, .. }
            | ClientError::Credentials { message, .. }
            | ClientError::Setup { message, .. } => message.clone(),
            ClientError::Http { .. } => "Could not reach the server".to_string(),
            ClientError::Json { .. } => "The server sent an unreadable response".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ClientError::from_json(err)
    }
}

impl From<CoreError> for ClientError {
    #[track_caller]
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Decode { message, .. } => ClientError::decode(message),
            other => ClientError::validation(other.user_message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
