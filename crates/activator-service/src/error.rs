//! Token generation error types.

use activator_core::error::ActivatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("token lifetime out of range")]
    TtlOutOfRange,
}

impl From<TokenError> for ActivatorError {
    fn from(err: TokenError) -> Self {
        ActivatorError::Unknown(format!("token generation: {err}"))
    }
}
