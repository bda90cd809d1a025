//! Activation token generation and hashing.
//!
//! A token is 16 bytes from the OS CSPRNG, rendered as RFC 4648 base-32
//! without padding (26 characters). Only its SHA-256 digest is stored.

use activator_core::models::token::{ActivationToken, TOKEN_HASH_LEN};
use activator_core::models::user::UserId;
use chrono::{Duration, Utc};
use data_encoding::BASE32_NOPAD;
use rand::TryCryptoRng;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::TokenError;

/// Random bytes drawn per token.
pub const TOKEN_ENTROPY_BYTES: usize = 16;

/// Length of the base-32 plaintext for [`TOKEN_ENTROPY_BYTES`].
pub const TOKEN_PLAINTEXT_LEN: usize = 26;

/// Generate an activation token for `user_id` expiring `ttl` from now,
/// drawing entropy from the operating system.
pub fn generate_activation_token(
    user_id: UserId,
    ttl: Duration,
) -> Result<ActivationToken, TokenError> {
    generate_with(&mut OsRng, user_id, ttl)
}

/// Generate an activation token from an explicit random source.
///
/// A failing source is reported as [`TokenError::EntropyUnavailable`];
/// there is no fallback.
pub fn generate_with<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    user_id: UserId,
    ttl: Duration,
) -> Result<ActivationToken, TokenError> {
    let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| TokenError::EntropyUnavailable(e.to_string()))?;

    let expiry = Utc::now()
        .checked_add_signed(ttl)
        .ok_or(TokenError::TtlOutOfRange)?;

    let plaintext = BASE32_NOPAD.encode(&bytes);
    let hash = hash_token(&plaintext);

    Ok(ActivationToken {
        plaintext,
        hash,
        user_id,
        expiry,
    })
}

/// SHA-256 of the plaintext's bytes; the form persisted and looked up.
pub fn hash_token(plaintext: &str) -> [u8; TOKEN_HASH_LEN] {
    Sha256::digest(plaintext.as_bytes()).into()
}
