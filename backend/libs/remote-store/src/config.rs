//! Connection settings for the hosted data endpoint
//!
//! Both values are public: the anonymous key only grants what row-level
//! policies on the remote side allow.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStoreConfig {
    /// Project base URL, e.g. `https://project.example.co`
    pub base_url: String,
    /// Anonymous access key sent as `apikey` and bearer token
    pub anon_key: String,
    /// Per-request timeout
    #[serde(with = "duration_ms")]
    pub request_timeout: Duration,
}

impl RemoteStoreConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            request_timeout: Duration::from_millis(default_request_timeout_ms()),
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `REMOTE_STORE_URL` (required)
    /// - `REMOTE_STORE_ANON_KEY` (required)
    /// - `REMOTE_STORE_TIMEOUT_MS` (default 10000)
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("REMOTE_STORE_URL")
            .map_err(|_| "REMOTE_STORE_URL must be set".to_string())?;
        let anon_key = std::env::var("REMOTE_STORE_ANON_KEY")
            .map_err(|_| "REMOTE_STORE_ANON_KEY must be set".to_string())?;

        let request_timeout_ms = match std::env::var("REMOTE_STORE_TIMEOUT_MS") {
            Ok(val) => val.parse::<u64>().map_err(|e| {
                format!("Failed to parse REMOTE_STORE_TIMEOUT_MS='{}': {}", val, e)
            })?,
            Err(_) => default_request_timeout_ms(),
        };

        let config = Self {
            request_timeout: Duration::from_millis(request_timeout_ms),
            ..Self::new(base_url, anon_key)
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| format!("REMOTE_STORE_URL '{}' is not a valid URL: {}", self.base_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "REMOTE_STORE_URL must use http or https, got '{}'",
                url.scheme()
            ));
        }
        if self.anon_key.trim().is_empty() {
            return Err("REMOTE_STORE_ANON_KEY must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
