//! dealdesk - organizations, accounts and deals over an embedded SQLite database
//!
//! The library holds the storage layer (schema, fixtures, row mapping and the
//! filtered deal query), the API models, and the axum handlers. The binary in
//! `main.rs` wires them into a server.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod util;
