//! End-to-end tests of the HTTP surface over in-memory SurrealDB and
//! an in-process mail transport.

use std::time::Duration;

use activator_db::Database;
use activator_mail::{ActivationLink, MemoryTransport, Notifier, NotifierConfig};
use activator_server::{AppState, api};
use activator_service::{ActivationConfig, TokenService, UserService};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use surrealdb_types::SurrealValue;
use tower::ServiceExt;
use url::Url;

#[derive(Debug, SurrealValue)]
struct StoredToken {
    user_id: i64,
}

struct TestApp {
    router: Router,
    db: Surreal<Db>,
    mail: MemoryTransport,
}

async fn spawn_app(mail: MemoryTransport) -> TestApp {
    spawn_app_with(mail, Duration::from_secs(5)).await
}

async fn spawn_app_with(mail: MemoryTransport, request_timeout: Duration) -> TestApp {
    let client = Surreal::new::<Mem>(()).await.unwrap();
    let db = Database::open(client, "test", "test").await.unwrap();

    let notifier = Notifier::new(
        mail.clone(),
        ActivationLink::new("http://127.0.0.1:8080", "/activate").unwrap(),
        notifier_config(),
    );
    let state = AppState::new(
        UserService::new(db.users()),
        TokenService::new(db.tokens(), ActivationConfig::default()),
        notifier,
    );

    TestApp {
        router: api::router(state, request_timeout),
        db: db.client().clone(),
        mail,
    }
}

fn notifier_config() -> NotifierConfig {
    NotifierConfig {
        sender: "noreply@example.org".into(),
        retry_delay: Duration::from_millis(5),
        ..NotifierConfig::default()
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json)
        }
        None => Body::empty(),
    };

    let response = app
        .router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn signup(app: &TestApp, email: &str) -> (StatusCode, Value) {
    let body = json!({ "email": email, "user_name": "A", "nick_name": "a1" });
    send(app, Method::POST, "/users", Some(body.to_string())).await
}

/// Pull the token out of the last delivered activation letter.
fn last_token(mail: &MemoryTransport) -> String {
    let sent = mail.sent();
    let body = &sent.last().expect("no letter delivered").body;
    let start = body.find("http://").expect("no link in letter");
    let link = body[start..].split_whitespace().next().unwrap();
    Url::parse(link)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "token")
        .map(|(_, v)| v.into_owned())
        .expect("link has no token")
}

async fn stored_tokens(db: &Surreal<Db>) -> Vec<StoredToken> {
    let mut result = db.query("SELECT user_id FROM token").await.unwrap();
    result.take(0).unwrap()
}

#[tokio::test]
async fn signup_then_activate() {
    let app = spawn_app(MemoryTransport::new()).await;

    let (status, user) = signup(&app, "a@b.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "a@b.com");
    assert_eq!(user["user_name"], "A");
    assert_eq!(user["nick_name"], "a1");
    assert_eq!(user["activated"], false);
    let id = user["id"].as_i64().unwrap();

    let sent = app.mail.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@b.com");
    assert_eq!(sent[0].subject, "Subscription activation letter");
    let token = last_token(&app.mail);
    assert_eq!(token.len(), 26);

    let (status, body) = send(&app, Method::GET, &format!("/activate?token={token}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "success" }));

    let (status, user) = send(&app, Method::GET, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["activated"], true);

    assert!(stored_tokens(&app.db).await.is_empty());

    let (status, body) = send(&app, Method::GET, &format!("/activate?token={token}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn undeliverable_letter_keeps_user_and_token() {
    let app = spawn_app(MemoryTransport::failing(2)).await;

    let (status, body) = signup(&app, "a@b.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "unknown");
    assert_eq!(app.mail.attempts(), 2);
    assert!(app.mail.sent().is_empty());

    let (status, user) = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["activated"], false);

    let tokens = stored_tokens(&app.db).await;
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].user_id, 1);
}

#[tokio::test]
async fn one_failed_delivery_is_retried() {
    let app = spawn_app(MemoryTransport::failing(1)).await;

    let (status, _) = signup(&app, "a@b.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.mail.attempts(), 2);
    assert_eq!(app.mail.sent().len(), 1);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = spawn_app(MemoryTransport::new()).await;

    let (status, body) = send(&app, Method::POST, "/users", Some("{not json".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");
    assert!(app.mail.sent().is_empty());
}

#[tokio::test]
async fn invalid_signup_fields_are_bad_request() {
    let app = spawn_app(MemoryTransport::new()).await;

    let body = json!({ "email": "not-an-email", "user_name": "A", "nick_name": "a1" });
    let (status, _) = send(&app, Method::POST, "/users", Some(body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "email": "a@b.com", "user_name": "", "nick_name": "a1" });
    let (status, _) = send(&app, Method::POST, "/users", Some(body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(stored_tokens(&app.db).await.is_empty());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = spawn_app(MemoryTransport::new()).await;

    let (status, _) = signup(&app, "a@b.com").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = signup(&app, "a@b.com").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_exists");
    assert_eq!(app.mail.sent().len(), 1);
}

#[tokio::test]
async fn get_user_errors() {
    let app = spawn_app(MemoryTransport::new()).await;

    let (status, body) = send(&app, Method::GET, "/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");

    let (status, body) = send(&app, Method::GET, "/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn delete_user_removes_account_and_tokens() {
    let app = spawn_app(MemoryTransport::new()).await;

    let (_, user) = signup(&app, "a@b.com").await;
    let id = user["id"].as_i64().unwrap();
    let token = last_token(&app.mail);

    let (status, body) = send(&app, Method::DELETE, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "success" }));

    let (status, _) = send(&app, Method::GET, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &format!("/activate?token={token}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn activation_requires_a_token() {
    let app = spawn_app(MemoryTransport::new()).await;

    let (status, body) = send(&app, Method::GET, "/activate", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");

    let (status, _) = send(&app, Method::GET, "/activate?token=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/activate?token=AAAAAAAAAAAAAAAAAAAAAAAAAA",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn slow_relay_gets_both_attempts_within_the_budget() {
    let per_attempt = Duration::from_millis(200);
    let budget = notifier_config().delivery_budget(per_attempt);
    let app = spawn_app_with(
        MemoryTransport::stalling(per_attempt),
        budget + Duration::from_millis(300),
    )
    .await;

    let (status, body) = signup(&app, "a@b.com").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "unknown");
    assert_eq!(app.mail.attempts(), 2);
}

#[tokio::test]
async fn request_over_the_timeout_is_408() {
    let app = spawn_app_with(
        MemoryTransport::stalling(Duration::from_millis(500)),
        Duration::from_millis(100),
    )
    .await;

    let (status, _) = signup(&app, "a@b.com").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(app.mail.attempts(), 1);
}
