//! Time limits for single async operations

use crate::metrics::TimeoutMetrics;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Debug, thiserror::Error)]
pub enum TimeoutError {
    #[error("Operation timed out after {0:?}")]
    Elapsed(Duration),
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Execute a future with a time limit
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    match timeout(duration, future).await {
        Ok(value) => {
            TimeoutMetrics::record_operation("completed");
            Ok(value)
        }
        Err(_) => {
            TimeoutMetrics::record_operation("elapsed");
            Err(TimeoutError::Elapsed(duration))
        }
    }
}

/// Execute a fallible future with a time limit, flattening its error into `TimeoutError`
pub async fn with_timeout_result<F, T, E>(duration: Duration, future: F) -> Result<T, TimeoutError>
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    with_timeout(duration, future)
        .await?
        .map_err(|e| TimeoutError::OperationFailed(e.to_string()))
}
