//! Mail transports.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::MailError;

/// A rendered plain-text message, independent of the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
}

/// Delivers one message per call. Retrying is the caller's business.
pub trait MailTransport: Send + Sync {
    fn deliver(&self, email: &OutgoingEmail) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Per-connection timeout (default: 5 seconds).
    pub timeout: Duration,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 25,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Unauthenticated, unencrypted SMTP delivery through lettre.
#[derive(Clone)]
pub struct SmtpTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    pub fn new(config: &SmtpConfig) -> Self {
        let inner = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            .port(config.port)
            .timeout(Some(config.timeout))
            .build();
        Self { inner }
    }
}

impl MailTransport for SmtpTransport {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;
        self.inner
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MailError::Delivery(e.to_string()))
    }
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: raw.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let from = Mailbox::new(None, parse_address(&email.from)?);
    let to = Mailbox::new(Some(email.to_name.clone()), parse_address(&email.to)?);

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}
