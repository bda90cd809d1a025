//! Activator Database: SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - Opening a migrated store ([`Database`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - [`repository`] implementations of the `activator-core` traits

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{Database, DbConfig};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
