//! Activator Mail: activation email rendering and delivery.
//!
//! The [`Notifier`] renders the activation link into a plain-text
//! message and hands it to a [`MailTransport`], retrying a fixed number
//! of times. [`SmtpTransport`] delivers through lettre. With the
//! `test-util` feature, `MemoryTransport` keeps messages in process.

pub mod error;
pub mod link;
#[cfg(any(test, feature = "test-util"))]
mod memory;
pub mod notifier;
pub mod transport;

pub use error::MailError;
pub use link::ActivationLink;
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryTransport;
pub use notifier::{Notifier, NotifierConfig};
pub use transport::{MailTransport, OutgoingEmail, SmtpConfig, SmtpTransport};
