//! # Roster Web Server Library
//!
//! Server-rendered CRUD pages for the user roster.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `forms`: Form decoding and validation
//! - `middleware`: Response middleware
//! - `routes`: Route handlers
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod views;
