//! Ports to the hosted backend.
//!
//! Route handlers and services talk to these traits rather than to the
//! REST client directly, so the page logic can run against an in-memory
//! fake in tests.

use std::collections::HashSet;

use async_trait::async_trait;
use d2c_market_core::{AnonymousUserId, Brand, Category, CategoryId, Product, ProductId};
use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// PostgREST error code (e.g., `PGRST116`), if provided.
        code: Option<String>,
        /// Human-readable message.
        message: String,
    },

    /// Response body did not match the expected row shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A query expected at most one row but got more.
    #[error("Expected at most one row, got {0}")]
    MultipleRows(usize),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Read access to catalog tables.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Newest products first, with brand and category embedded.
    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, BackendError>;

    /// All categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, BackendError>;

    /// All brands ordered by name.
    async fn list_brands(&self) -> Result<Vec<Brand>, BackendError>;

    /// A single product by slug, with brand and category embedded.
    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, BackendError>;

    /// Other products in `category`, excluding `exclude`.
    async fn related_products(
        &self,
        category: &CategoryId,
        exclude: &ProductId,
        limit: usize,
    ) -> Result<Vec<Product>, BackendError>;

    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> Result<(), BackendError>;
}

/// Read/write access to wishlist rows, keyed by anonymous visitor.
#[async_trait]
pub trait WishlistStore: Send + Sync {
    /// Product ids saved by `user`.
    async fn wishlist_product_ids(
        &self,
        user: &AnonymousUserId,
    ) -> Result<HashSet<ProductId>, BackendError>;

    /// Whether `user` has saved `product`.
    async fn wishlist_contains(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<bool, BackendError>;

    /// Insert a `(user, product)` row.
    async fn add_to_wishlist(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<(), BackendError>;

    /// Delete every `(user, product)` row.
    async fn remove_from_wishlist(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<(), BackendError>;
}
