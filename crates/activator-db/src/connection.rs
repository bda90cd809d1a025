//! Opening the activator store.
//!
//! [`Database::connect`] reaches a remote SurrealDB over WebSocket;
//! [`Database::open`] takes any already-built client. Both leave the
//! schema migrated, so a returned [`Database`] is ready to serve
//! repositories.

use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;
use crate::repository::{SurrealTokenRepository, SurrealUserRepository};
use crate::schema::run_migrations;

#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket address, e.g. `127.0.0.1:8000`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "activator".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// A migrated activator store.
#[derive(Clone)]
pub struct Database<C: Connection> {
    client: Surreal<C>,
}

impl Database<Client> {
    /// Sign in as root on the remote server, then [`open`](Database::open)
    /// the configured namespace and database.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(url = %config.url, "Connecting to SurrealDB");

        let client = Surreal::new::<Ws>(config.url.as_str()).await?;
        client
            .signin(Root {
                username: config.username.clone(),
                password: config.password.clone(),
            })
            .await?;

        Self::open(client, &config.namespace, &config.database).await
    }
}

impl<C: Connection> Database<C> {
    /// Select `namespace`/`database` on `client` and apply pending
    /// migrations.
    pub async fn open(client: Surreal<C>, namespace: &str, database: &str) -> Result<Self, DbError> {
        client.use_ns(namespace).use_db(database).await?;
        run_migrations(&client).await?;

        info!(namespace, database, "Activator store ready");
        Ok(Self { client })
    }

    pub fn client(&self) -> &Surreal<C> {
        &self.client
    }

    pub fn users(&self) -> SurrealUserRepository<C> {
        SurrealUserRepository::new(self.client.clone())
    }

    pub fn tokens(&self) -> SurrealTokenRepository<C> {
        SurrealTokenRepository::new(self.client.clone())
    }
}
