//! Client configuration loaded from the environment (`.env` supported via dotenvy)

use crate::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_ENRICHMENT_CONCURRENCY, STORAGE_DIR_NAME, STORAGE_FILE_NAME,
};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_BACKEND_URL: &str = "SLAY_BACKEND_URL";
pub const ENV_STORAGE_PATH: &str = "SLAY_STORAGE_PATH";
pub const ENV_ENRICH_CONCURRENCY: &str = "SLAY_ENRICH_CONCURRENCY";
pub const ENV_FAVORITES_CACHE_SECS: &str = "SLAY_FAVORITES_CACHE_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SLAY_REQUEST_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid backend URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("No platform data directory available, set SLAY_STORAGE_PATH")]
    NoDataDir,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, always ending in `/`
    pub backend_url: Url,
    /// File holding the client-local key/value storage (credential lives here)
    pub storage_path: PathBuf,
    /// Artist lookups in flight per page; 1 keeps enrichment strictly sequential
    pub enrichment_concurrency: usize,
    /// Lifetime of a resolved favorites playlist id; `None` re-resolves every call
    pub favorites_cache_ttl: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Config pointing at `backend_url` with every other knob at its default
    pub fn new(backend_url: &str, storage_path: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: normalize_base_url(backend_url)?,
            storage_path,
            enrichment_concurrency: DEFAULT_ENRICHMENT_CONCURRENCY,
            favorites_cache_ttl: None,
            request_timeout: None,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (environment, map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup(ENV_BACKEND_URL).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let storage_path = match lookup(ENV_STORAGE_PATH) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_storage_path()?,
        };

        let mut config = Self::new(&backend, storage_path)?;

        if let Some(value) = lookup(ENV_ENRICH_CONCURRENCY) {
            let parsed = parse_number(ENV_ENRICH_CONCURRENCY, &value)?;
            config.enrichment_concurrency = parsed.max(1) as usize;
        }
        if let Some(value) = lookup(ENV_FAVORITES_CACHE_SECS) {
            let secs = parse_number(ENV_FAVORITES_CACHE_SECS, &value)?;
            config.favorites_cache_ttl = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = parse_number(ENV_REQUEST_TIMEOUT_SECS, &value)?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        log::debug!(
            "[Config] backend={} storage={} concurrency={}",
            config.backend_url,
            config.storage_path.display(),
            config.enrichment_concurrency
        );

        Ok(config)
    }
}

/// Parse and force a trailing slash so relative endpoints join under the base path
pub fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&with_slash).map_err(|e| ConfigError::InvalidUrl(trimmed.to_string(), e.to_string()))
}

pub fn default_storage_path() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(STORAGE_DIR_NAME).join(STORAGE_FILE_NAME))
        .ok_or(ConfigError::NoDataDir)
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}
