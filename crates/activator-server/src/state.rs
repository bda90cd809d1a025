//! Shared handler state.

use std::sync::Arc;

use activator_core::repository::{TokenRepository, UserRepository};
use activator_mail::{MailTransport, Notifier};
use activator_service::{TokenService, UserService};

/// Services shared by every request. Cloning is cheap.
pub struct AppState<U: UserRepository, T: TokenRepository, M: MailTransport> {
    pub users: Arc<UserService<U>>,
    pub tokens: Arc<TokenService<T>>,
    pub notifier: Arc<Notifier<M>>,
}

impl<U: UserRepository, T: TokenRepository, M: MailTransport> AppState<U, T, M> {
    pub fn new(users: UserService<U>, tokens: TokenService<T>, notifier: Notifier<M>) -> Self {
        Self {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            notifier: Arc::new(notifier),
        }
    }
}

impl<U: UserRepository, T: TokenRepository, M: MailTransport> Clone for AppState<U, T, M> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            tokens: Arc::clone(&self.tokens),
            notifier: Arc::clone(&self.notifier),
        }
    }
}
