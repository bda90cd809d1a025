//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Write operations report the
//! number of rows they touched; the service layer turns those counts
//! into post-condition checks.

use chrono::{DateTime, Utc};

use crate::error::ActivatorResult;
use crate::models::token::{ActivationToken, TOKEN_HASH_LEN};
use crate::models::user::{CreateUser, User, UserId};

pub trait UserRepository: Send + Sync {
    /// Insert a new, unactivated user and return it with its assigned id.
    fn create(&self, input: CreateUser) -> impl Future<Output = ActivatorResult<User>> + Send;
    fn get_by_id(&self, id: UserId) -> impl Future<Output = ActivatorResult<User>> + Send;
    /// Delete the user and every token it owns. Returns deleted user rows.
    fn delete(&self, id: UserId) -> impl Future<Output = ActivatorResult<u64>> + Send;
    /// Resolve the owner of a token whose hash matches and whose expiry
    /// is strictly after `now`.
    fn find_id_by_token_hash(
        &self,
        hash: [u8; TOKEN_HASH_LEN],
        now: DateTime<Utc>,
    ) -> impl Future<Output = ActivatorResult<UserId>> + Send;
    /// Set `activated = true`. Returns updated user rows.
    fn activate(&self, id: UserId) -> impl Future<Output = ActivatorResult<u64>> + Send;
}

pub trait TokenRepository: Send + Sync {
    /// Persist the hash, owner and expiry. Returns inserted rows.
    fn save(&self, token: &ActivationToken) -> impl Future<Output = ActivatorResult<u64>> + Send;
    /// Remove every token owned by `user_id`. Returns deleted rows.
    fn delete_all(&self, user_id: UserId) -> impl Future<Output = ActivatorResult<u64>> + Send;
}
