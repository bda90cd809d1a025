//! SurrealDB implementation of [`TokenRepository`].

use activator_core::error::ActivatorResult;
use activator_core::models::token::ActivationToken;
use activator_core::models::user::UserId;
use activator_core::repository::TokenRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct TokenRow {
    #[allow(dead_code)]
    user_id: i64,
}

/// SurrealDB implementation of the Token repository.
///
/// Only the hex-encoded SHA-256 of a token reaches the database.
#[derive(Clone)]
pub struct SurrealTokenRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTokenRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TokenRepository for SurrealTokenRepository<C> {
    async fn save(&self, token: &ActivationToken) -> ActivatorResult<u64> {
        let result = self
            .db
            .query(
                "CREATE token SET \
                 hash = $hash, \
                 user_id = $user_id, \
                 expiry = $expiry",
            )
            .bind(("hash", hex::encode(token.hash)))
            .bind(("user_id", token.user_id))
            .bind(("expiry", token.expiry))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement(e, "token", "token repo save"))?;

        let inserted: Vec<TokenRow> = result.take(0).map_err(DbError::from)?;

        debug!(user_id = token.user_id, inserted = inserted.len(), "Token saved");
        Ok(inserted.len() as u64)
    }

    async fn delete_all(&self, user_id: UserId) -> ActivatorResult<u64> {
        let result = self
            .db
            .query("DELETE token WHERE user_id = $user_id RETURN BEFORE")
            .bind(("user_id", user_id))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement(e, "token", "token repo delete_all"))?;

        let deleted: Vec<TokenRow> = result.take(0).map_err(DbError::from)?;

        debug!(user_id, deleted = deleted.len(), "Tokens deleted");
        Ok(deleted.len() as u64)
    }
}
