//! Catalog and stock service client.
//!
//! Plain REST over `reqwest`: `GET /products`, `GET /products/{id}` and
//! `GET /stock/{id}`. Product reads are cached using `moka` (5-minute TTL);
//! stock reads always hit the service so quantity checks see fresh
//! availability.

mod cache;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use jacaranda_core::ProductId;

use crate::config::CatalogConfig;
use crate::types::{CatalogProduct, Stock};
use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the service.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Service returned an unexpected status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Remote lookups the cart store depends on.
///
/// [`CatalogClient`] is the production implementation; tests supply in-memory
/// fakes.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch a product record by ID.
    async fn fetch_product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError>;

    /// Fetch the current availability for a product. Never served from cache.
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog/stock service.
///
/// Cheaply cloneable; product reads are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.clone(),
                cache,
            }),
        }
    }

    /// Execute a GET request and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                body: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{path}",
            self.inner.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such product,
    /// or another `CatalogError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&format!("products/{id}"));
        let product: CatalogProduct = match self.get_json(&url).await {
            Ok(product) => product,
            Err(CatalogError::Status { status, .. })
                if status == reqwest::StatusCode::NOT_FOUND =>
            {
                return Err(CatalogError::NotFound(format!("Product not found: {id}")));
            }
            Err(e) => return Err(e),
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// List all catalog products.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<CatalogProduct>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let url = self.endpoint("products");
        let products: Vec<CatalogProduct> = self.get_json(&url).await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get the current stock for a product. Always hits the service.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the service has no stock record
    /// for the product, or another `CatalogError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let url = self.endpoint(&format!("stock/{id}"));
        match self.get_json(&url).await {
            Ok(stock) => Ok(stock),
            Err(CatalogError::Status { status, .. })
                if status == reqwest::StatusCode::NOT_FOUND =>
            {
                Err(CatalogError::NotFound(format!("Stock not found: {id}")))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn fetch_product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        self.get_product(id).await
    }

    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.get_stock(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: Url::parse(base).unwrap(),
            api_token: None,
        })
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = client("http://localhost:3333");
        assert_eq!(
            client.endpoint("products/1"),
            "http://localhost:3333/products/1"
        );
        assert_eq!(client.endpoint("stock/7"), "http://localhost:3333/stock/7");
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = client("http://localhost:3333/");
        assert_eq!(client.endpoint("products"), "http://localhost:3333/products");
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("Product not found: 9".to_string());
        assert_eq!(err.to_string(), "Not found: Product not found: 9");

        let err = CatalogError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
