//! Activator server binary.
//!
//! ```bash
//! activator --listen 0.0.0.0:8080 --db-url 127.0.0.1:8000 --smtp-host mail.local
//!
//! # Environment variables work too; flags take precedence.
//! ACTIVATOR_LISTEN=0.0.0.0:8080 ACTIVATOR_LOG=debug activator
//! ```

use activator_server::{Config, ServerError, logging, server};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = Config::parse();
    logging::init(&config);

    if let Err(e) = server::run(config).await {
        tracing::error!(error = %e, "Activator server failed");
        return Err(e);
    }
    Ok(())
}
