//! Activator Core: domain models, error types and repository traits
//! shared by every crate in the workspace.

pub mod error;
pub mod models;
pub mod repository;
