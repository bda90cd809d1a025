//! In-process transport for tests.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::MailError;
use crate::transport::{MailTransport, OutgoingEmail};

#[derive(Debug, Default)]
struct MemoryState {
    sent: Vec<OutgoingEmail>,
    attempts: usize,
    failures_left: usize,
    stall: Option<Duration>,
}

/// Transport that records delivered messages.
///
/// Clones share state, so a handle kept outside a [`crate::Notifier`]
/// sees everything the notifier sent. `failing(n)` rejects the first
/// `n` deliveries; `stalling(d)` makes every delivery hang for `d`
/// and then fail, like an SMTP relay that never answers.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failures: usize) -> Self {
        let transport = Self::default();
        transport.lock().failures_left = failures;
        transport
    }

    pub fn stalling(delay: Duration) -> Self {
        let transport = Self::default();
        transport.lock().stall = Some(delay);
        transport
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.lock().sent.clone()
    }

    /// Deliveries attempted so far, failed ones included.
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MailTransport for MemoryTransport {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let stall = {
            let mut state = self.lock();
            state.attempts += 1;
            state.stall
        };
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
            return Err(MailError::Delivery("relay timed out".into()));
        }

        let mut state = self.lock();
        if state.failures_left > 0 {
            state.failures_left -= 1;
            return Err(MailError::Delivery("relay rejected message".into()));
        }
        state.sent.push(email.clone());
        Ok(())
    }
}
