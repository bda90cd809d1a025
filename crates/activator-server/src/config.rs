//! Server configuration.
//!
//! Every option can be given as a flag or through its `ACTIVATOR_*`
//! environment variable; flags win.

use std::net::SocketAddr;
use std::time::Duration;

use activator_db::DbConfig;
use activator_mail::{NotifierConfig, SmtpConfig};
use clap::{Parser, ValueEnum};

/// Time left for storage work once mail delivery has used its budget.
pub const REQUEST_HEADROOM: Duration = Duration::from_secs(2);

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// JSON when stdout is not a terminal, text otherwise.
    Auto,
    Json,
    Text,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "activator", version, about = "User signup and email activation service")]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long = "listen", env = "ACTIVATOR_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen_addr: SocketAddr,

    /// SurrealDB WebSocket address.
    #[arg(long, env = "ACTIVATOR_DB_URL", default_value = "127.0.0.1:8000")]
    pub db_url: String,

    #[arg(long, env = "ACTIVATOR_DB_NAMESPACE", default_value = "activator")]
    pub db_namespace: String,

    #[arg(long, env = "ACTIVATOR_DB_NAME", default_value = "main")]
    pub db_name: String,

    #[arg(long, env = "ACTIVATOR_DB_USER", default_value = "root")]
    pub db_user: String,

    #[arg(
        long,
        env = "ACTIVATOR_DB_PASSWORD",
        default_value = "root",
        hide_env_values = true
    )]
    pub db_password: String,

    /// Tracing filter directives, e.g. `info` or `activator_service=debug`.
    #[arg(long, env = "ACTIVATOR_LOG", default_value = "info")]
    pub log_filter: String,

    #[arg(long, env = "ACTIVATOR_LOG_FORMAT", value_enum, default_value_t = LogFormat::Auto)]
    pub log_format: LogFormat,

    #[arg(long, env = "ACTIVATOR_SMTP_HOST", default_value = "localhost")]
    pub smtp_host: String,

    #[arg(long, env = "ACTIVATOR_SMTP_PORT", default_value_t = 25)]
    pub smtp_port: u16,

    /// Per-attempt SMTP timeout.
    #[arg(long, env = "ACTIVATOR_SMTP_TIMEOUT_SECS", default_value_t = 5)]
    pub smtp_timeout_secs: u64,

    /// `From` address of activation emails.
    #[arg(long, env = "ACTIVATOR_MAIL_SENDER", default_value = "noreply@localhost")]
    pub mail_sender: String,

    /// Scheme and authority of activation links. Defaults to
    /// `http://<listen>`.
    #[arg(long, env = "ACTIVATOR_ACTIVATION_BASE_URL")]
    pub activation_base_url: Option<String>,

    #[arg(long, env = "ACTIVATOR_ACTIVATION_PATH", default_value = "/activate")]
    pub activation_path: String,

    /// Upper bound on handling a single request. Raised to fit every
    /// mail delivery attempt when set lower.
    #[arg(long, env = "ACTIVATOR_REQUEST_TIMEOUT_SECS", default_value_t = 5)]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_name.clone(),
            username: self.db_user.clone(),
            password: self.db_password.clone(),
        }
    }

    pub fn smtp_config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            timeout: Duration::from_secs(self.smtp_timeout_secs),
        }
    }

    pub fn notifier_config(&self) -> NotifierConfig {
        NotifierConfig {
            sender: self.mail_sender.clone(),
            ..NotifierConfig::default()
        }
    }

    pub fn activation_base_url(&self) -> String {
        self.activation_base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.listen_addr))
    }

    /// The configured request timeout, or the signup mail budget plus
    /// [`REQUEST_HEADROOM`] if that is longer.
    pub fn request_timeout(&self) -> Duration {
        let floor = self
            .notifier_config()
            .delivery_budget(self.smtp_config().timeout)
            + REQUEST_HEADROOM;
        Duration::from_secs(self.request_timeout_secs).max(floor)
    }
}
