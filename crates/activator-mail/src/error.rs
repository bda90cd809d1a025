//! Mail error types.

use activator_core::error::ActivatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address {address}: {reason}")]
    Address { address: String, reason: String },

    #[error("invalid activation link: {0}")]
    Link(String),

    #[error("message build failed: {0}")]
    Build(String),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("{attempts} attempts, message was not sent")]
    Exhausted { attempts: u32 },
}

impl From<MailError> for ActivatorError {
    fn from(err: MailError) -> Self {
        ActivatorError::Unknown(err.to_string())
    }
}
