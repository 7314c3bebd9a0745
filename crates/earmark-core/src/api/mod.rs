//! HTTP access to the audio backend.
//!
//! - `http`: the authenticated request pipeline (bearer injection, 401 handling)
//! - `client`: typed endpoints built on top of it
//!
//! The backend issues JWT bearer tokens from `POST /api/token` and rejects
//! missing or expired tokens with 401.

pub mod client;
pub mod error;
pub mod http;

pub use client::ApiClient;
pub use error::ApiError;
pub use http::{HttpClient, UnauthorizedHandler};
