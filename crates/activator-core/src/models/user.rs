//! User domain model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store-assigned user identifier.
pub type UserId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(rename = "user_name")]
    pub name: String,
    #[serde(rename = "nick_name")]
    pub nickname: String,
    /// Flipped to `true` once, by a successful activation.
    pub activated: bool,
}

/// Signup input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    #[serde(rename = "user_name")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "nick_name")]
    #[validate(length(min = 1))]
    pub nickname: String,
}
