use activator_core::error::ActivatorError;
use activator_core::models::user::{CreateUser, User, UserId};
use activator_core::repository::{TokenRepository, UserRepository};
use activator_mail::MailTransport;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ActivateParams {
    pub token: Option<String>,
}

fn success() -> Json<Value> {
    Json(json!({ "result": "success" }))
}

fn parse_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse::<UserId>().map_err(|_| {
        ApiError(ActivatorError::InvalidArgument {
            message: format!("invalid user id: {raw}"),
        })
    })
}

/// `POST /users`: register and send the activation letter.
///
/// The user row is kept when the letter cannot be delivered.
pub async fn create<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailTransport,
{
    let Json(input) = payload.map_err(|rejection| {
        ApiError(ActivatorError::InvalidArgument {
            message: format!("invalid json user params: {}", rejection.body_text()),
        })
    })?;

    let user = state.users.create(input).await?;
    let token = state.tokens.issue_for(&user).await?;
    debug!(user_id = user.id, "Sending activation letter");

    state.notifier.send(&user, &token.plaintext).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/:id`
pub async fn find<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, ApiError>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailTransport,
{
    let id = parse_id(&raw_id)?;
    let user = state.users.find(id).await?;
    Ok(Json(user))
}

/// `DELETE /users/:id`
pub async fn delete<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailTransport,
{
    let id = parse_id(&raw_id)?;
    state.users.delete(id).await?;
    Ok(success())
}

/// `GET /activate?token=...`: activate the owner, then revoke every
/// token it holds.
pub async fn activate<U, T, M>(
    State(state): State<AppState<U, T, M>>,
    params: Result<Query<ActivateParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailTransport,
{
    let token = params
        .ok()
        .and_then(|Query(p)| p.token)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError(ActivatorError::InvalidArgument {
                message: "activation token is required".into(),
            })
        })?;

    let user_id = state.users.activate(&token).await?;
    state.tokens.revoke_all(user_id).await?;

    info!(user_id, "Activation completed");
    Ok(success())
}
