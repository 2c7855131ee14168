//! Error types for Community Service
//!
//! Every failure a handler can hit maps onto one variant here. Readiness and
//! remote-store errors are converted at the boundary so handlers only ever
//! propagate `AppError` with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use remote_store::StoreError;
use resilience::ReadinessError;
use std::time::Duration;
use thiserror::Error;

/// Result type for community-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote handle not ready within the wait budget
    #[error("Remote data endpoint not ready within {0:?}")]
    Timeout(Duration),

    /// Readiness polling ran out of attempts
    #[error("Remote data endpoint unavailable after {attempts} attempts")]
    InitializationFailed { attempts: u32 },

    /// The remote endpoint returned an error payload or could not be reached
    #[error("Remote request failed: {0}")]
    RemoteRequestFailed(String),

    /// Unique constraint hit on insert
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Credential hash did not match
    #[error("Password does not match")]
    AuthorizationMismatch,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short machine-readable label, also used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Timeout(_) => "timeout",
            AppError::InitializationFailed { .. } => "initialization_failed",
            AppError::RemoteRequestFailed(_) => "remote_request_failed",
            AppError::DuplicateEntry(_) => "duplicate_entry",
            AppError::AuthorizationMismatch => "authorization_mismatch",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation",
            AppError::Internal(_) => "internal",
        }
    }

    /// Log at the level matching the error and count it
    pub(crate) fn report(&self) {
        crate::metrics::record_error(self.kind());
        match self {
            AppError::DuplicateEntry(_) => tracing::info!(error = %self, "Duplicate entry rejected"),
            AppError::NotFound(_) | AppError::Validation(_) | AppError::AuthorizationMismatch => {
                tracing::warn!(kind = self.kind(), error = %self, "Request rejected")
            }
            _ => tracing::error!(kind = self.kind(), error = %self, "Request failed"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::InitializationFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RemoteRequestFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::DuplicateEntry(_) => StatusCode::CONFLICT,
            AppError::AuthorizationMismatch => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.report();

        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

impl From<ReadinessError> for AppError {
    fn from(err: ReadinessError) -> Self {
        match err {
            ReadinessError::Timeout(waited) => AppError::Timeout(waited),
            ReadinessError::InitializationFailed { attempts } => {
                AppError::InitializationFailed { attempts }
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            e if e.is_duplicate() => AppError::DuplicateEntry(e.to_string()),
            StoreError::InvalidConfig(msg) => AppError::Internal(msg),
            e => AppError::RemoteRequestFailed(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
