use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Invalid priority: {value} {location}")]
    InvalidPriority {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid status: {value} {location}")]
    InvalidStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Cannot {action} an order that is {from} {location}")]
    InvalidTransition {
        from: String,
        action: String,
        location: ErrorLocation,
    },

    #[error("Malformed payload: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("A column drag is already in progress {location}")]
    GestureInProgress { location: ErrorLocation },

    #[error("No column drag in progress {location}")]
    NotDragging { location: ErrorLocation },

    #[error("Column index {index} out of range for {len} columns {location}")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Create a validation error for a named input field
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &str, message: S) -> Self {
        CoreError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a decode error for a payload that cannot become a typed model
    #[track_caller]
    pub fn decode<S: Into<String>>(message: S) -> Self {
        CoreError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message suitable for showing next to a form field
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Decode { message, .. } => message.clone(),
            Self::InvalidTransition { from, action, .. } => {
                format!("Cannot {} an order that is {}", action, from)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
