//! Startup and runtime errors of the server binary.

use activator_db::DbError;
use activator_mail::MailError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database unavailable: {0}")]
    Database(#[from] DbError),

    #[error("mail setup failed: {0}")]
    Mail(#[from] MailError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
