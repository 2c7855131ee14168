//! Configuration management for Community Service
//!
//! Everything is read from environment variables (a `.env` file is honoured by the
//! binary). Malformed numeric values are configuration errors, never silent defaults.

use remote_store::RemoteStoreConfig;
use resilience::{Backoff, Platform, ReadinessConfig};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Hosted data endpoint
    pub remote: RemoteStoreConfig,
    /// Readiness polling and waiting
    pub readiness: ReadinessSettings,
    /// Site behaviour: list sizes, roster, uploads
    pub site: SiteConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone)]
pub struct ReadinessSettings {
    pub platform: Platform,
    pub polling: ReadinessConfig,
    /// How long a request waits for the remote handle before answering 504
    pub wait_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// JSON roster file; the built-in roster is used when unset
    pub member_roster_path: Option<PathBuf>,
    /// Newest top-level comments shown under a news item
    pub comment_preview: usize,
    /// Board posts fetched for the floating panel
    pub board_fetch_limit: usize,
    /// Board posts displayed after category filtering
    pub board_display_limit: usize,
    /// News items fetched for the floating panel
    pub news_fetch_limit: usize,
    /// News items displayed in the floating panel
    pub news_display_limit: usize,
    /// Largest accepted upload
    pub media_max_bytes: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            member_roster_path: None,
            comment_preview: 3,
            board_fetch_limit: 20,
            board_display_limit: 10,
            news_fetch_limit: 20,
            news_display_limit: 15,
            media_max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("COMMUNITY_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("COMMUNITY_SERVICE_PORT", 8080)?,
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            remote: RemoteStoreConfig::from_env()?,
            readiness: ReadinessSettings::from_env()?,
            site: SiteConfig::from_env()?,
        })
    }
}

impl ReadinessSettings {
    /// - `READINESS_PLATFORM`: desktop (default), mobile, safari, pwa
    /// - `READINESS_INTERVAL_MS`, `READINESS_MAX_ATTEMPTS`: override the platform preset
    /// - `READINESS_BACKOFF`: fixed (default) or exponential
    /// - `READINESS_WAIT_TIMEOUT_MS`: per-request wait, default 5000
    fn from_env() -> Result<Self, String> {
        let platform: Platform = parse_env_or_default("READINESS_PLATFORM", Platform::Desktop)?;
        let mut polling = ReadinessConfig::for_platform(platform);

        if let Some(interval_ms) = parse_env_optional::<u64>("READINESS_INTERVAL_MS")? {
            polling.interval = Duration::from_millis(interval_ms);
        }
        if let Some(max_attempts) = parse_env_optional::<u32>("READINESS_MAX_ATTEMPTS")? {
            polling.max_attempts = max_attempts;
        }

        polling.backoff = match std::env::var("READINESS_BACKOFF") {
            Err(_) => Backoff::Fixed,
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "fixed" => Backoff::Fixed,
                "exponential" => Backoff::Exponential {
                    multiplier: 2.0,
                    max_delay: Duration::from_secs(2),
                    jitter: true,
                },
                other => {
                    return Err(format!(
                        "READINESS_BACKOFF must be 'fixed' or 'exponential', got '{}'",
                        other
                    ))
                }
            },
        };

        let wait_timeout_ms: u64 = parse_env_or_default("READINESS_WAIT_TIMEOUT_MS", 5_000)?;

        Ok(Self {
            platform,
            polling,
            wait_timeout: Duration::from_millis(wait_timeout_ms),
        })
    }
}

impl SiteConfig {
    fn from_env() -> Result<Self, String> {
        let defaults = SiteConfig::default();

        let config = SiteConfig {
            member_roster_path: std::env::var("SITE_MEMBER_ROSTER_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            comment_preview: parse_env_or_default("SITE_COMMENT_PREVIEW", defaults.comment_preview)?,
            board_fetch_limit: parse_env_or_default(
                "SITE_BOARD_FETCH_LIMIT",
                defaults.board_fetch_limit,
            )?,
            board_display_limit: parse_env_or_default(
                "SITE_BOARD_DISPLAY_LIMIT",
                defaults.board_display_limit,
            )?,
            news_fetch_limit: parse_env_or_default(
                "SITE_NEWS_FETCH_LIMIT",
                defaults.news_fetch_limit,
            )?,
            news_display_limit: parse_env_or_default(
                "SITE_NEWS_DISPLAY_LIMIT",
                defaults.news_display_limit,
            )?,
            media_max_bytes: parse_env_or_default("SITE_MEDIA_MAX_BYTES", defaults.media_max_bytes)?,
        };

        if config.comment_preview == 0 {
            return Err("SITE_COMMENT_PREVIEW must be at least 1".to_string());
        }
        Ok(config)
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_env_optional(key)?.unwrap_or(default))
}

fn parse_env_optional<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(None),
    }
}
