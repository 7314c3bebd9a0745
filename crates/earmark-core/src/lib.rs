//! Core library for earmark.
//!
//! Holds everything that does not touch the terminal:
//!
//! - `auth`: the access-token store and its durable key-value storage
//! - `api`: the authenticated HTTP client wrapper and the typed backend client
//! - `router`: the route table, hash history and the login navigation guard
//! - `models`: wire types returned by the backend
//! - `config`: persisted application configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod router;
