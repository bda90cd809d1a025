//! Service bootstrap: database, mail, router, listener.

use activator_db::Database;
use activator_mail::{ActivationLink, Notifier, SmtpTransport};
use activator_service::{ActivationConfig, TokenService, UserService};
use tokio::net::TcpListener;
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::error::ServerError;
use crate::state::AppState;

/// Connect collaborators and serve until Ctrl-C.
pub async fn run(config: Config) -> Result<(), ServerError> {
    info!(listen_addr = %config.listen_addr, "Starting activator");

    let db = Database::connect(&config.db_config()).await?;

    let link = ActivationLink::new(&config.activation_base_url(), &config.activation_path)?;
    let notifier = Notifier::new(
        SmtpTransport::new(&config.smtp_config()),
        link,
        config.notifier_config(),
    );

    let state = AppState::new(
        UserService::new(db.users()),
        TokenService::new(db.tokens(), ActivationConfig::default()),
        notifier,
    );

    let request_timeout = config.request_timeout();
    info!(?request_timeout, "Request timeout");
    let app = api::router(state, request_timeout);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Activator stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
