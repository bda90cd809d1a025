//! Database-specific error types and conversions.

use activator_core::error::ActivatorError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("{context}: {message}")]
    Query { context: String, message: String },

    #[error("Record not found: {entity} with {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },
}

impl DbError {
    /// Classify a failed statement. Unique index violations become
    /// [`DbError::AlreadyExists`]; everything else keeps its message
    /// under `context`.
    pub(crate) fn statement(err: surrealdb::Error, entity: &str, context: &str) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            DbError::AlreadyExists {
                entity: entity.to_string(),
            }
        } else {
            DbError::Query {
                context: context.to_string(),
                message,
            }
        }
    }
}

impl From<DbError> for ActivatorError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ActivatorError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => ActivatorError::AlreadyExists { entity },
            other => ActivatorError::Unknown(other.to_string()),
        }
    }
}
