//! Community Service Library
//!
//! Serves the community site's news, board, comments, event attendance and member
//! directory. All persistence is delegated to the hosted data endpoint; every request
//! first resolves the shared remote handle through the readiness coordinator.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers and route table
//! - `models`: Rows stored remotely and the local member roster
//! - `services`: Data operations over the resolved remote handle
//! - `views`: View-models and escaped HTML fragments
//! - `error`: Error types and HTTP mapping
//! - `config`: Configuration management
//! - `metrics`: Prometheus collectors and the `/metrics` handler

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod security;
pub mod services;
pub mod state;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
