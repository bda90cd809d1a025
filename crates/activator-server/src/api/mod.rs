//! HTTP routes.
//!
//! | Method | Path          | Success |
//! |--------|---------------|---------|
//! | POST   | `/users`      | 201 + user |
//! | GET    | `/users/:id`  | 200 + user |
//! | DELETE | `/users/:id`  | 200 + `{"result":"success"}` |
//! | GET    | `/activate`   | 200 + `{"result":"success"}` |

mod error;
mod users;

use std::time::Duration;

use activator_core::repository::{TokenRepository, UserRepository};
use activator_mail::MailTransport;
use axum::Router;
use axum::routing::{get, post};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use error::ApiError;

/// Build the application router over the given services.
///
/// Requests that take longer than `request_timeout` are answered with
/// `408 Request Timeout`.
pub fn router<U, T, M>(state: AppState<U, T, M>, request_timeout: Duration) -> Router
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    M: MailTransport + 'static,
{
    Router::new()
        .route("/users", post(users::create::<U, T, M>))
        .route(
            "/users/:id",
            get(users::find::<U, T, M>).delete(users::delete::<U, T, M>),
        )
        .route("/activate", get(users::activate::<U, T, M>))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
