//! Page data assembly for the catalog and product detail pages.
//!
//! Backend reads are issued concurrently. A failed read is logged and
//! degrades to empty data so that a partial outage still renders a page.

use std::collections::HashSet;

use d2c_market_core::{AnonymousUserId, Brand, Category, Product, ProductId};
use tracing::instrument;

use crate::backend::{BackendError, CatalogBackend, WishlistStore};
use crate::config::CatalogLimits;

/// Everything the catalog page renders from.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    /// Newest first.
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    /// Product ids the visitor has saved.
    pub wishlist: HashSet<ProductId>,
}

/// Load products, categories, brands and the visitor's wishlist.
#[instrument(skip(catalog, wishlist), fields(user = %user))]
pub async fn load_catalog(
    catalog: &dyn CatalogBackend,
    wishlist: &dyn WishlistStore,
    user: &AnonymousUserId,
    limits: CatalogLimits,
) -> CatalogSnapshot {
    let (products, categories, brands, saved) = tokio::join!(
        catalog.list_products(limits.product_limit),
        catalog.list_categories(),
        catalog.list_brands(),
        wishlist.wishlist_product_ids(user),
    );

    CatalogSnapshot {
        products: or_default(products, "products"),
        categories: or_default(categories, "categories"),
        brands: or_default(brands, "brands"),
        wishlist: or_default(saved, "wishlist"),
    }
}

/// Everything the product detail page renders from.
#[derive(Debug)]
pub struct ProductDetail {
    pub product: Product,
    pub in_wishlist: bool,
    /// Same category, excluding `product`.
    pub related: Vec<Product>,
}

/// Look up a product by slug and gather its wishlist state and related
/// products. Returns `None` when the slug matches nothing or the lookup
/// fails.
#[instrument(skip(catalog, wishlist), fields(user = %user))]
pub async fn load_product_detail(
    catalog: &dyn CatalogBackend,
    wishlist: &dyn WishlistStore,
    user: &AnonymousUserId,
    slug: &str,
    related_limit: usize,
) -> Option<ProductDetail> {
    let product = match catalog.product_by_slug(slug).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            tracing::debug!("No product with this slug");
            return None;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch product");
            return None;
        }
    };

    let (in_wishlist, related) = tokio::join!(
        wishlist.wishlist_contains(user, &product.id),
        catalog.related_products(&product.category_id, &product.id, related_limit),
    );

    Some(ProductDetail {
        in_wishlist: or_default(in_wishlist, "wishlist membership"),
        related: or_default(related, "related products"),
        product,
    })
}

fn or_default<T: Default>(result: Result<T, BackendError>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, what, "Failed to fetch from backend");
        T::default()
    })
}
