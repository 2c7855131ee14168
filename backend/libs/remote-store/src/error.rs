//! Error types for remote store calls

use serde::Deserialize;
use thiserror::Error;

/// Postgres `unique_violation`
pub const UNIQUE_VIOLATION: &str = "23505";

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid remote store configuration: {0}")]
    InvalidConfig(String),

    #[error("Request to remote store failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with an error payload
    #[error("Remote store returned {status}: {message}")]
    Remote {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
    },

    #[error("Failed to decode remote store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Postgres error code carried by the payload, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Remote { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Insert hit a unique constraint
    pub fn is_duplicate(&self) -> bool {
        self.code() == Some(UNIQUE_VIOLATION)
    }

    /// The endpoint could not be reached or is not serving yet
    pub fn is_unavailable(&self) -> bool {
        match self {
            StoreError::Request(e) => e.is_connect() || e.is_timeout(),
            StoreError::Remote { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Remote { status, .. } => Some(*status),
            StoreError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error body shape: `{"code": "...", "message": "...", "details": ..., "hint": ...}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    #[serde(alias = "error")]
    error_description: Option<String>,
    details: Option<String>,
}

impl StoreError {
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => StoreError::Remote {
                status,
                code: parsed.code,
                message: parsed
                    .message
                    .or(parsed.error_description)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
                details: parsed.details,
            },
            Err(_) => StoreError::Remote {
                status,
                code: None,
                message: if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                },
                details: None,
            },
        }
    }
}
