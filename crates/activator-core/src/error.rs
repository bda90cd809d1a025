//! Error types for the activator system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActivatorError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Entity not found: {entity} with {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    /// A write touched a number of rows that violates the operation's
    /// post-condition.
    #[error("Unexpected row count for {operation}: expected {expected}, got {actual}")]
    UnexpectedRowCount {
        operation: String,
        expected: String,
        actual: u64,
    },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ActivatorError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ActivatorError::InvalidArgument { .. } => "invalid_argument",
            ActivatorError::NotFound { .. } => "not_found",
            ActivatorError::AlreadyExists { .. } => "already_exists",
            ActivatorError::UnexpectedRowCount { .. } => "unexpected_row_count",
            ActivatorError::Unknown(_) => "unknown",
        }
    }
}

impl From<validator::ValidationErrors> for ActivatorError {
    fn from(err: validator::ValidationErrors) -> Self {
        ActivatorError::InvalidArgument {
            message: err.to_string(),
        }
    }
}

pub type ActivatorResult<T> = Result<T, ActivatorError>;
