use std::sync::Arc;

use crate::auth::TokenStore;

use super::{Route, RouteName};

/// Outcome of a guard for one navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(RouteName),
}

/// Check run before every navigation. `from` is `None` for the first navigation.
pub trait NavigationGuard: Send + Sync {
    fn before_each(&self, to: &Route, from: Option<&Route>) -> Decision;
}

impl<F> NavigationGuard for F
where
    F: Fn(&Route, Option<&Route>) -> Decision + Send + Sync,
{
    fn before_each(&self, to: &Route, from: Option<&Route>) -> Decision {
        self(to, from)
    }
}

/// Sends every navigation except the one to `Login` to `Login` while there is
/// no access token.
pub struct RequireLogin {
    tokens: Arc<TokenStore>,
}

impl RequireLogin {
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        Self { tokens }
    }
}

impl NavigationGuard for RequireLogin {
    fn before_each(&self, to: &Route, _from: Option<&Route>) -> Decision {
        if to.name != RouteName::Login && !self.tokens.is_authenticated() {
            Decision::Redirect(RouteName::Login)
        } else {
            Decision::Allow
        }
    }
}
