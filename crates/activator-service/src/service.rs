//! User and token services: signup, lookup, deletion and activation.

use activator_core::error::{ActivatorError, ActivatorResult};
use activator_core::models::token::ActivationToken;
use activator_core::models::user::{CreateUser, User, UserId};
use activator_core::repository::{TokenRepository, UserRepository};
use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

use crate::config::ActivationConfig;
use crate::token;

/// Issues and revokes activation tokens.
///
/// Generic over the token store so that the service has no dependency
/// on the database crate.
pub struct TokenService<T: TokenRepository> {
    repo: T,
    config: ActivationConfig,
}

impl<T: TokenRepository> TokenService<T> {
    pub fn new(repo: T, config: ActivationConfig) -> Self {
        Self { repo, config }
    }

    /// Generate a token for `user` and persist its hash.
    ///
    /// The returned value is the only place the plaintext exists.
    pub async fn issue_for(&self, user: &User) -> ActivatorResult<ActivationToken> {
        let token = token::generate_activation_token(user.id, self.config.token_ttl())?;

        let inserted = self.repo.save(&token).await?;
        if inserted != 1 {
            return Err(ActivatorError::UnexpectedRowCount {
                operation: "token save".into(),
                expected: "1".into(),
                actual: inserted,
            });
        }

        debug!(user_id = user.id, expiry = %token.expiry, "Activation token issued");
        Ok(token)
    }

    /// Delete every outstanding token of `user_id`.
    ///
    /// Deleting nothing is reported as [`ActivatorError::UnexpectedRowCount`],
    /// so a user without tokens cannot be told apart from a failed revoke.
    pub async fn revoke_all(&self, user_id: UserId) -> ActivatorResult<()> {
        let deleted = self.repo.delete_all(user_id).await?;
        if deleted == 0 {
            return Err(ActivatorError::UnexpectedRowCount {
                operation: "token delete_all".into(),
                expected: ">= 1".into(),
                actual: 0,
            });
        }

        debug!(user_id, deleted, "Activation tokens revoked");
        Ok(())
    }
}

/// Account lifecycle service.
pub struct UserService<U: UserRepository> {
    repo: U,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repo: U) -> Self {
        Self { repo }
    }

    /// Validate the signup input and store a new, unactivated user.
    pub async fn create(&self, input: CreateUser) -> ActivatorResult<User> {
        input.validate()?;
        let user = self.repo.create(input).await?;
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn find(&self, id: UserId) -> ActivatorResult<User> {
        self.repo.get_by_id(id).await
    }

    /// Delete a user together with its tokens.
    pub async fn delete(&self, id: UserId) -> ActivatorResult<()> {
        let deleted = self.repo.delete(id).await?;
        if deleted != 1 {
            return Err(ActivatorError::NotFound {
                entity: "user".into(),
                id: format!("id={id}"),
            });
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Redeem an activation token and mark its owner activated.
    ///
    /// Tokens are left in place; the caller revokes them with
    /// [`TokenService::revoke_all`] once this returns.
    pub async fn activate(&self, token_plaintext: &str) -> ActivatorResult<UserId> {
        let hash = token::hash_token(token_plaintext);

        let id = self.repo.find_id_by_token_hash(hash, Utc::now()).await?;

        let updated = self.repo.activate(id).await?;
        if updated == 0 {
            // The owner disappeared between lookup and update.
            return Err(ActivatorError::NotFound {
                entity: "user".into(),
                id: format!("id={id}"),
            });
        }

        info!(user_id = id, "User activated");
        Ok(id)
    }
}
