//! # Roster Shared Library
//!
//! This crate contains the data layer used by the Roster web server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `db`: Connection pooling and migrations
//! - `store`: The `UserStore` abstraction with PostgreSQL and in-memory backends

pub mod db;
pub mod models;
pub mod store;

/// Current version of the Roster shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
