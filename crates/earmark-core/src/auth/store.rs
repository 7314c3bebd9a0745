use std::sync::{PoisonError, RwLock};

use tracing::{debug, info, warn};

use super::KeyValueStore;

/// Storage key under which the access token is persisted
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Holds the access token for the running client.
///
/// The store is constructed once at startup and shared by reference with the
/// HTTP client and the router guard. Only [`TokenStore::login`] mutates it.
pub struct TokenStore {
    token: RwLock<Option<String>>,
    storage: Box<dyn KeyValueStore>,
}

impl TokenStore {
    /// Create a store hydrated from durable storage.
    ///
    /// A missing key, an empty value or an unreadable storage all start the
    /// client without a token.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let token = match storage.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read stored access token");
                None
            }
        };
        debug!(has_token = token.is_some(), "Token store hydrated");

        Self {
            token: RwLock::new(token),
            storage,
        }
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Record a new access token and persist it.
    ///
    /// The token is not validated. A failed write is logged; the in-memory
    /// token is set regardless.
    pub fn login(&self, token: &str) {
        {
            let mut current = self.token.write().unwrap_or_else(PoisonError::into_inner);
            *current = Some(token.to_string()).filter(|t| !t.is_empty());
        }

        match self.storage.set(ACCESS_TOKEN_KEY, token) {
            Ok(()) => info!("Access token stored"),
            Err(e) => warn!(error = %e, "Failed to persist access token"),
        }
    }
}
