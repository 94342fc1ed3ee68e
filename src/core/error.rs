//! Typed errors for the entry gateway
//!
//! Callers only see an HTTP status and a short plain-text message. The full
//! cause of a failure is logged where the error is built.
//!
//! - [`EntryError`]: everything a handler can answer with
//! - [`CoercionError`]: a request value of an unusable JSON type
//! - [`Operation`]: which gateway operation failed, for the public message

use crate::core::entry::EntryField;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Gateway operations, used to label failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    DeleteMany,
}

impl Operation {
    /// Plain-text body returned to the caller when this operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "Error fetching entries",
            Operation::Create => "Error adding entry",
            Operation::Update => "Error updating entry",
            Operation::Delete => "Error deleting entry",
            Operation::DeleteMany => "Error deleting multiple entries",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list entries",
            Operation::Create => "create entry",
            Operation::Update => "update entry",
            Operation::Delete => "delete entry",
            Operation::DeleteMany => "delete entries",
        };
        f.write_str(name)
    }
}

/// Errors answered by the HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// No entry carries the requested identifier
    #[error("entry '{id}' not found")]
    NotFound { id: String },

    /// The path identifier is not a valid entry id
    #[error("invalid entry id '{value}'")]
    InvalidId { value: String },

    /// The request body is not usable at all (e.g. not a JSON object)
    #[error("invalid request body: {message}")]
    InvalidBody { message: String },

    /// The store or the coercion step failed
    #[error("failed to {operation}: {message}")]
    Failed { operation: Operation, message: String },
}

impl EntryError {
    /// Wrap a failure of `operation`, logging its full cause
    pub fn failed(operation: Operation, err: anyhow::Error) -> Self {
        tracing::error!(%operation, "{:#}", err);
        EntryError::Failed {
            operation,
            message: format!("{:#}", err),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntryError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntryError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            EntryError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            EntryError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body sent to the caller
    pub fn public_message(&self) -> String {
        match self {
            EntryError::NotFound { .. } => "Entry not found".to_string(),
            EntryError::InvalidId { value } => format!("Invalid entry id: {}", value),
            EntryError::InvalidBody { message } => format!("Invalid request body: {}", message),
            EntryError::Failed { operation, .. } => operation.failure_message().to_string(),
        }
    }
}

impl IntoResponse for EntryError {
    fn into_response(self) -> Response {
        (self.status_code(), self.public_message()).into_response()
    }
}

/// A request value whose JSON type cannot be coerced into its field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}' expects {expected}, found {found}")]
pub struct CoercionError {
    pub field: &'static str,
    pub expected: &'static str,
    pub found: &'static str,
}

impl CoercionError {
    pub fn new(field: EntryField, expected: &'static str, found: &'static str) -> Self {
        Self {
            field: field.as_str(),
            expected,
            found,
        }
    }
}
