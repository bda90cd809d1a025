//! Activator Server: HTTP surface, configuration and bootstrap.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::ServerError;
pub use state::AppState;
