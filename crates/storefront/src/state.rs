//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{BackendError, CatalogBackend, WishlistStore};
use crate::config::StorefrontConfig;
use crate::supabase::SupabaseClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the backend ports and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogBackend>,
    wishlist: Arc<dyn WishlistStore>,
}

impl AppState {
    /// Create application state backed by the hosted REST endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, BackendError> {
        let client = SupabaseClient::new(&config.supabase)?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    /// Create application state over any backend implementing both ports.
    #[must_use]
    pub fn with_backend<B>(config: StorefrontConfig, backend: Arc<B>) -> Self
    where
        B: CatalogBackend + WishlistStore + 'static,
    {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: backend.clone(),
                wishlist: backend,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Catalog read port.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogBackend {
        self.inner.catalog.as_ref()
    }

    /// Wishlist read/write port.
    #[must_use]
    pub fn wishlist(&self) -> &dyn WishlistStore {
        self.inner.wishlist.as_ref()
    }
}
