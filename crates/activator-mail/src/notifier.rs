//! Activation email notifier with a fixed retry policy.

use std::time::Duration;

use activator_core::error::ActivatorResult;
use activator_core::models::user::User;
use tracing::{debug, error, info};

use crate::error::MailError;
use crate::link::ActivationLink;
use crate::transport::{MailTransport, OutgoingEmail};

pub const ACTIVATION_SUBJECT: &str = "Subscription activation letter";

/// Notifier configuration.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// `From` address of activation emails.
    pub sender: String,
    /// Delivery attempts per message (default: 2).
    pub attempts: u32,
    /// Pause between attempts (default: 100 ms). No backoff, no jitter.
    pub retry_delay: Duration,
}

impl NotifierConfig {
    /// Longest time [`Notifier::send`] can take when every attempt runs
    /// for `per_attempt` before failing.
    pub fn delivery_budget(&self, per_attempt: Duration) -> Duration {
        let attempts = self.attempts.max(1);
        per_attempt * attempts + self.retry_delay * (attempts - 1)
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            sender: "noreply@localhost".into(),
            attempts: 2,
            retry_delay: Duration::from_millis(100),
        }
    }
}

/// Sends activation links to newly registered users.
pub struct Notifier<T: MailTransport> {
    transport: T,
    link: ActivationLink,
    config: NotifierConfig,
}

impl<T: MailTransport> Notifier<T> {
    pub fn new(transport: T, link: ActivationLink, config: NotifierConfig) -> Self {
        Self {
            transport,
            link,
            config,
        }
    }

    /// Render the activation message for `recipient`.
    pub fn render(&self, recipient: &User, token: &str) -> OutgoingEmail {
        let link = self.link.for_token(token);
        OutgoingEmail {
            from: self.config.sender.clone(),
            to: recipient.email.clone(),
            to_name: recipient.name.clone(),
            subject: ACTIVATION_SUBJECT.to_string(),
            body: format!("Hello, {}!\nYour activation link: {}\n", recipient.name, link),
        }
    }

    /// Deliver the activation link, trying up to `attempts` times.
    pub async fn send(&self, recipient: &User, token: &str) -> ActivatorResult<()> {
        let email = self.render(recipient, token);
        debug!(user_id = recipient.id, body = %email.body, "Activation message rendered");

        let attempts = self.config.attempts.max(1);
        for attempt in 1..=attempts {
            match self.transport.deliver(&email).await {
                Ok(()) => {
                    info!(
                        user_id = recipient.id,
                        recipient = %recipient.email,
                        attempt,
                        "Activation email sent"
                    );
                    return Ok(());
                }
                Err(e) => {
                    error!(
                        user_id = recipient.id,
                        recipient = %recipient.email,
                        attempt,
                        error = %e,
                        "Activation email delivery failed"
                    );
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }

        Err(MailError::Exhausted { attempts }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_covers_every_attempt_and_pause() {
        let config = NotifierConfig::default();
        assert_eq!(
            config.delivery_budget(Duration::from_secs(5)),
            Duration::from_millis(10_100)
        );
    }

    #[test]
    fn single_attempt_has_no_pause() {
        let config = NotifierConfig {
            attempts: 1,
            ..NotifierConfig::default()
        };
        assert_eq!(
            config.delivery_budget(Duration::from_secs(2)),
            Duration::from_secs(2)
        );
    }
}
