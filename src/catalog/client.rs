//! Fake Store API client
//!
//! Fetches product listings, categories, and single products, with an
//! optional on-disk cache in front of every request.

use chrono::Duration;
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::Product;
use crate::cache::CacheManager;

/// Public Fake Store API
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// How long a cached response counts as fresh when no TTL is configured
const DEFAULT_CACHE_TTL_MINUTES: i64 = 60;

/// Errors that can occur when talking to the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("catalog API returned status {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API has no product with this id
    #[error("product {0} not found")]
    NotFound(u64),

    /// The configured base URL cannot carry a path
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Offline mode and nothing cached for the request
    #[error("offline and no cached copy of {0}")]
    Offline(String),
}

/// Client for the product catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http_client: Client,
    cache_manager: Option<CacheManager>,
    cache_ttl: Duration,
    base_url: String,
    offline: bool,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    /// Creates a client for the public API with no cache
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client for a custom base URL (mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache_manager: None,
            cache_ttl: Duration::minutes(DEFAULT_CACHE_TTL_MINUTES),
            base_url: base_url.into(),
            offline: false,
        }
    }

    /// Puts a response cache in front of every request
    pub fn with_cache(mut self, cache_manager: CacheManager, ttl: Duration) -> Self {
        self.cache_manager = Some(cache_manager);
        self.cache_ttl = ttl;
        self
    }

    /// Serve only from cache, never touching the network
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// `GET /products`
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetch_cached(&["products"]).await
    }

    /// `GET /products/categories`
    pub async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.fetch_cached(&["products", "categories"]).await
    }

    /// `GET /products/category/{name}`
    pub async fn fetch_category(&self, name: &str) -> Result<Vec<Product>, CatalogError> {
        self.fetch_cached(&["products", "category", name]).await
    }

    /// `GET /products/{id}`
    ///
    /// The API answers an unknown id with an empty body, which maps to
    /// [`CatalogError::NotFound`].
    pub async fn fetch_product(&self, id: u64) -> Result<Product, CatalogError> {
        let id_segment = id.to_string();
        let product: Option<Product> = self.fetch_cached(&["products", id_segment.as_str()]).await?;
        product.ok_or(CatalogError::NotFound(id))
    }

    /// Fetches a path, going through the cache when one is configured
    ///
    /// - Fresh cache entries are returned without a request
    /// - Otherwise the API is queried and the answer cached
    /// - On API failure an expired entry is returned if one exists
    async fn fetch_cached<T>(&self, segments: &[&str]) -> Result<T, CatalogError>
    where
        T: Serialize + DeserializeOwned,
    {
        let key = segments.join("/");

        let cached = self
            .cache_manager
            .as_ref()
            .and_then(|cache| cache.read::<T>(&key));

        let stale = match cached {
            Some(entry) if !entry.is_expired || self.offline => {
                debug!(key = %key, cached_at = %entry.cached_at, "catalog cache hit");
                return Ok(entry.data);
            }
            other => other,
        };

        if self.offline {
            return Err(CatalogError::Offline(key));
        }

        match self.fetch_from_api::<T>(segments).await {
            Ok(data) => {
                if let Some(ref cache) = self.cache_manager {
                    if let Err(e) = cache.write(&key, &data, self.cache_ttl) {
                        warn!(key = %key, error = %e, "failed to cache catalog response");
                    }
                }
                Ok(data)
            }
            Err(e) => match stale {
                Some(entry) => {
                    warn!(key = %key, error = %e, cached_at = %entry.cached_at, "serving expired catalog data");
                    Ok(entry.data)
                }
                None => Err(e),
            },
        }
    }

    async fn fetch_from_api<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, CatalogError> {
        let url = self.url_for(segments)?;
        debug!(url = %url, "fetching from catalog");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    /// Appends path segments to the base URL, percent-encoding each one
    fn url_for(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
