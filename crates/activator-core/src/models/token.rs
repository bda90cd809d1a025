//! Activation token domain model.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::user::UserId;

/// Length of the SHA-256 digest persisted in place of the plaintext.
pub const TOKEN_HASH_LEN: usize = 32;

/// A freshly issued activation credential.
///
/// `plaintext` only travels from the generator to the notifier; the
/// store sees `hash`, `user_id` and `expiry`.
#[derive(Clone, PartialEq, Eq)]
pub struct ActivationToken {
    pub plaintext: String,
    pub hash: [u8; TOKEN_HASH_LEN],
    pub user_id: UserId,
    pub expiry: DateTime<Utc>,
}

impl ActivationToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}

impl fmt::Debug for ActivationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationToken")
            .field("plaintext", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("expiry", &self.expiry)
            .finish()
    }
}
