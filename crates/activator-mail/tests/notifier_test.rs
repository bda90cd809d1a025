//! Integration tests for the activation notifier.

use std::time::{Duration, Instant};

use activator_core::error::ActivatorError;
use activator_core::models::user::User;
use activator_mail::notifier::ACTIVATION_SUBJECT;
use activator_mail::{ActivationLink, MemoryTransport, Notifier, NotifierConfig};

fn recipient() -> User {
    User {
        id: 1,
        email: "a@b.com".into(),
        name: "A".into(),
        nickname: "a1".into(),
        activated: false,
    }
}

fn notifier(transport: MemoryTransport) -> Notifier<MemoryTransport> {
    let link = ActivationLink::new("http://127.0.0.1:8080", "/activate").unwrap();
    Notifier::new(
        transport,
        link,
        NotifierConfig {
            sender: "noreply@example.org".into(),
            ..NotifierConfig::default()
        },
    )
}

#[tokio::test]
async fn first_attempt_success_sends_once() {
    let transport = MemoryTransport::new();
    let notifier = notifier(transport.clone());

    notifier
        .send(&recipient(), "MFRGGZDFMZTWQ2LKNNWG23TPOA")
        .await
        .unwrap();

    assert_eq!(transport.attempts(), 1);
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@b.com");
    assert_eq!(sent[0].from, "noreply@example.org");
    assert_eq!(sent[0].subject, ACTIVATION_SUBJECT);
    assert_eq!(
        sent[0].body,
        "Hello, A!\nYour activation link: \
         http://127.0.0.1:8080/activate?token=MFRGGZDFMZTWQ2LKNNWG23TPOA\n"
    );
}

#[tokio::test]
async fn second_attempt_recovers_after_fixed_delay() {
    let transport = MemoryTransport::failing(1);
    let notifier = notifier(transport.clone());

    let started = Instant::now();
    notifier.send(&recipient(), "TOKEN").await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(100));
    assert_eq!(transport.attempts(), 2);
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test]
async fn two_failures_exhaust_the_policy() {
    let transport = MemoryTransport::failing(5);
    let notifier = notifier(transport.clone());

    let err = notifier.send(&recipient(), "TOKEN").await.unwrap_err();

    assert_eq!(transport.attempts(), 2);
    assert!(transport.sent().is_empty());
    match err {
        ActivatorError::Unknown(msg) => assert!(msg.contains("2 attempts"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}
