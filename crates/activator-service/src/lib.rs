//! Activator Service: activation token generation and the user/token
//! services that drive signup and activation.

pub mod config;
pub mod error;
pub mod service;
pub mod token;

pub use config::ActivationConfig;
pub use error::TokenError;
pub use service::{TokenService, UserService};
pub use token::{generate_activation_token, hash_token};
