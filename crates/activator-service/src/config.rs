//! Activation configuration.

use chrono::Duration;

/// Configuration for token issuance.
#[derive(Debug, Clone)]
pub struct ActivationConfig {
    /// Activation token lifetime in seconds (default: 259_200 = 72 hours).
    pub token_lifetime_secs: u64,
}

impl ActivationConfig {
    pub fn token_ttl(&self) -> Duration {
        i64::try_from(self.token_lifetime_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            token_lifetime_secs: 259_200,
        }
    }
}
