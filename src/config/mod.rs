//! Configuration module for the equiptrain client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::errors::AppError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the REST backend, e.g. `https://api.example.com/api`
    pub api_base_url: String,
    /// Root of the public site, used to build referral links
    pub site_base_url: String,
    /// Bearer token forwarded to the backend (admin session)
    pub api_token: Option<String>,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Lifetime of a cached SEO record
    pub seo_ttl: Duration,
    /// Maximum number of cached SEO records
    pub seo_cache_size: usize,
    /// Optional JSON file replacing the built-in SEO dataset
    pub seo_dataset_path: Option<PathBuf>,
    /// Language used for SEO lookups
    pub default_language: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080/api".to_string(),
            site_base_url: "http://127.0.0.1:5173".to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(15),
            seo_ttl: Duration::from_secs(600),
            seo_cache_size: 50,
            seo_dataset_path: None,
            default_language: "en".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let api_base_url = match env::var("TRAIN_API_BASE_URL") {
            Ok(raw) => parse_url("TRAIN_API_BASE_URL", &raw)?,
            Err(_) => defaults.api_base_url,
        };

        let site_base_url = match env::var("TRAIN_SITE_BASE_URL") {
            Ok(raw) => parse_url("TRAIN_SITE_BASE_URL", &raw)?,
            Err(_) => defaults.site_base_url,
        };

        let api_token = env::var("TRAIN_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let request_timeout = Duration::from_secs(parse_var(
            "TRAIN_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?);

        let seo_ttl = Duration::from_secs(parse_var(
            "TRAIN_SEO_TTL_SECS",
            defaults.seo_ttl.as_secs(),
        )?);

        let seo_cache_size = parse_var("TRAIN_SEO_CACHE_SIZE", defaults.seo_cache_size)?;
        if seo_cache_size == 0 {
            return Err(AppError::Config(
                "TRAIN_SEO_CACHE_SIZE must be at least 1".to_string(),
            ));
        }

        let seo_dataset_path = env::var("TRAIN_SEO_DATASET").ok().map(PathBuf::from);

        let default_language =
            env::var("TRAIN_DEFAULT_LANGUAGE").unwrap_or(defaults.default_language);

        let log_level = env::var("TRAIN_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = match env::var("TRAIN_LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.log_format,
        };

        Ok(Self {
            api_base_url,
            site_base_url,
            api_token,
            request_timeout,
            seo_ttl,
            seo_cache_size,
            seo_dataset_path,
            default_language,
            log_level,
            log_format,
        })
    }
}

/// Validate an absolute URL and return it without a trailing slash.
fn parse_url(key: &str, raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    Url::parse(trimmed).map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e)))?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn parse_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {} value: {}", key, e))),
        Err(_) => Ok(default),
    }
}
