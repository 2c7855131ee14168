//! Resilience patterns for the community backend
//!
//! This library provides the pieces that gate access to the hosted data endpoint:
//! - **Readiness**: a coordinator that resolves one shared client handle, polling on a
//!   bounded schedule, and lets any number of callers await the outcome
//! - **Backoff**: fixed or exponential delay policies with optional jitter
//! - **Timeout**: time limits for individual async operations
//!
//! # Example: waiting for a shared handle
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use resilience::{HandleFactory, ReadinessConfig, ReadinessCoordinator};
//! use std::time::Duration;
//!
//! struct Endpoint;
//!
//! #[async_trait]
//! impl HandleFactory for Endpoint {
//!     type Handle = String;
//!
//!     async fn build(&self) -> anyhow::Result<Option<String>> {
//!         Ok(Some("connected".to_string()))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let coordinator = ReadinessCoordinator::spawn(Endpoint, ReadinessConfig::default());
//!     let handle = coordinator.wait_until_ready(Duration::from_secs(5)).await;
//!     assert!(handle.is_ok());
//! }
//! ```

pub mod backoff;
pub mod metrics;
pub mod readiness;
pub mod timeout;

// Re-export main types for convenience
pub use backoff::Backoff;
pub use readiness::{
    HandleFactory, Platform, ReadinessConfig, ReadinessCoordinator, ReadinessError,
    ReadinessState,
};
pub use timeout::{with_timeout, with_timeout_result, TimeoutError};
