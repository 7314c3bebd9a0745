//! Authentication state for the client.
//!
//! This module provides:
//! - `TokenStore`: the single access token, hydrated from and persisted to durable storage
//! - `KeyValueStore`: the durable storage seam, with file-backed and in-memory implementations
//!
//! There is no logout and no token expiry: a token stays until a new login replaces it.

pub mod storage;
pub mod store;

pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{TokenStore, ACCESS_TOKEN_KEY};
