//! SurrealDB implementation of [`UserRepository`].

use activator_core::error::ActivatorResult;
use activator_core::models::token::TOKEN_HASH_LEN;
use activator_core::models::user::{CreateUser, User, UserId};
use activator_core::repository::UserRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct UserRow {
    email: String,
    user_name: String,
    nick_name: String,
    activated: bool,
}

impl UserRow {
    fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            name: self.user_name,
            nickname: self.nick_name,
            activated: self.activated,
        }
    }
}

#[derive(Debug, SurrealValue)]
struct CounterRow {
    last: i64,
}

#[derive(Debug, SurrealValue)]
struct TokenOwnerRow {
    user_id: i64,
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Draw the next user id from the `id_counter:user` record.
    async fn next_id(&self) -> Result<UserId, DbError> {
        let result = self
            .db
            .query(
                "UPSERT type::record('id_counter', 'user') \
                 SET last = (last ?? 0) + 1 RETURN AFTER",
            )
            .await?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement(e, "id_counter", "user id sequence"))?;

        let rows: Vec<CounterRow> = result.take(0)?;
        rows.first().map(|r| r.last).ok_or_else(|| DbError::Query {
            context: "user id sequence".into(),
            message: "counter returned no row".into(),
        })
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> ActivatorResult<User> {
        let id = self.next_id().await?;

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 email = $email, \
                 user_name = $user_name, \
                 nick_name = $nick_name, \
                 activated = false",
            )
            .bind(("id", id))
            .bind(("email", input.email))
            .bind(("user_name", input.name))
            .bind(("nick_name", input.nickname))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement(e, "user", "repo create"))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("id={id}"),
        })?;

        debug!(user_id = id, "User record created");
        Ok(row.into_user(id))
    }

    async fn get_by_id(&self, id: UserId) -> ActivatorResult<User> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("id={id}"),
        })?;

        Ok(row.into_user(id))
    }

    async fn delete(&self, id: UserId) -> ActivatorResult<u64> {
        let result = self
            .db
            .query(
                "DELETE type::record('user', $id) RETURN BEFORE; \
                 DELETE token WHERE user_id = $id",
            )
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement(e, "user", "repo delete"))?;

        let deleted: Vec<UserRow> = result.take(0).map_err(DbError::from)?;

        debug!(user_id = id, deleted = deleted.len(), "User delete executed");
        Ok(deleted.len() as u64)
    }

    async fn find_id_by_token_hash(
        &self,
        hash: [u8; TOKEN_HASH_LEN],
        now: DateTime<Utc>,
    ) -> ActivatorResult<UserId> {
        let mut result = self
            .db
            .query(
                "SELECT user_id FROM token \
                 WHERE hash = $hash AND expiry > $now \
                 LIMIT 1",
            )
            .bind(("hash", hex::encode(hash)))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TokenOwnerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "token".into(),
            id: "hash=<redacted>".into(),
        })?;

        Ok(row.user_id)
    }

    async fn activate(&self, id: UserId) -> ActivatorResult<u64> {
        let result = self
            .db
            .query("UPDATE type::record('user', $id) SET activated = true RETURN AFTER")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement(e, "user", "repo activate"))?;

        let updated: Vec<UserRow> = result.take(0).map_err(DbError::from)?;

        debug!(user_id = id, updated = updated.len(), "User activation executed");
        Ok(updated.len() as u64)
    }
}
