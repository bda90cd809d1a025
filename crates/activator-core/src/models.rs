//! Domain models for the activator.

pub mod token;
pub mod user;
