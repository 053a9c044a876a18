//! Runtime settings
//!
//! Each setting comes from its command-line flag if given, otherwise from a
//! `FAKESTORE_*` environment variable, otherwise from a built-in default.

use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use crate::cache::CacheManager;
use crate::catalog::{CatalogClient, DEFAULT_BASE_URL};
use crate::cli::Cli;
use crate::storage::FileStorage;

pub const ENV_API_URL: &str = "FAKESTORE_API_URL";
pub const ENV_DATA_DIR: &str = "FAKESTORE_DATA_DIR";
pub const ENV_CACHE_DIR: &str = "FAKESTORE_CACHE_DIR";
pub const ENV_CACHE_TTL_MINUTES: &str = "FAKESTORE_CACHE_TTL_MINUTES";

const DEFAULT_CACHE_TTL_MINUTES: u32 = 60;

/// Errors resolving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but cannot be parsed
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    /// No `--data-dir`, no env var, and no platform data directory
    #[error("cannot determine where to keep the cart; pass --data-dir or set FAKESTORE_DATA_DIR")]
    NoDataDir,
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    /// Override for the cart directory; `None` means the platform default
    pub data_dir: Option<PathBuf>,
    /// Override for the cache directory; `None` means the platform default
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub offline: bool,
}

impl Settings {
    /// Resolves settings from CLI flags and the process environment
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Resolves settings using `lookup` in place of the environment
    pub fn resolve<F>(cli: &Cli, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let api_url = cli
            .api_url
            .clone()
            .or_else(|| non_empty(ENV_API_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| non_empty(ENV_DATA_DIR).map(PathBuf::from));

        let cache_dir = cli
            .cache_dir
            .clone()
            .or_else(|| non_empty(ENV_CACHE_DIR).map(PathBuf::from));

        let ttl_minutes = match non_empty(ENV_CACHE_TTL_MINUTES) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: ENV_CACHE_TTL_MINUTES.to_string(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_CACHE_TTL_MINUTES,
        };

        Ok(Self {
            api_url,
            data_dir,
            cache_dir,
            cache_ttl: Duration::minutes(i64::from(ttl_minutes)),
            offline: cli.offline,
        })
    }

    /// File storage for the cart
    pub fn cart_storage(&self) -> Result<FileStorage, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(FileStorage::with_dir(dir.clone())),
            None => FileStorage::new().ok_or(ConfigError::NoDataDir),
        }
    }

    /// Catalog client with the response cache attached when a cache
    /// directory is available
    pub fn catalog_client(&self) -> CatalogClient {
        let cache = match &self.cache_dir {
            Some(dir) => Some(CacheManager::with_dir(dir.clone())),
            None => CacheManager::new(),
        };

        let client = CatalogClient::with_base_url(self.api_url.clone()).offline(self.offline);
        match cache {
            Some(cache) => client.with_cache(cache, self.cache_ttl),
            None => client,
        }
    }
}
