//! Backend ports implemented over the REST client.

use std::collections::HashSet;

use async_trait::async_trait;
use d2c_market_core::{
    AnonymousUserId, Brand, Category, CategoryId, NewWishlistEntry, Product, ProductId,
    WishlistProductRef,
};
use tracing::instrument;

use super::{Order, SupabaseClient};
use crate::backend::{BackendError, CatalogBackend, WishlistStore};

const PRODUCTS: &str = "products";
const CATEGORIES: &str = "categories";
const BRANDS: &str = "brands";
const WISHLISTS: &str = "wishlists";

/// Product columns plus the embedded brand and category rows.
const PRODUCT_SELECT: &str = "*,brand:brands(*),category:categories(*)";

#[async_trait]
impl CatalogBackend for SupabaseClient {
    #[instrument(skip(self))]
    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, BackendError> {
        self.from(PRODUCTS)
            .select(PRODUCT_SELECT)
            .order("created_at", Order::Desc)
            .limit(limit)
            .fetch()
            .await
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        self.from(CATEGORIES)
            .select("*")
            .order("name", Order::Asc)
            .fetch()
            .await
    }

    #[instrument(skip(self))]
    async fn list_brands(&self) -> Result<Vec<Brand>, BackendError> {
        self.from(BRANDS)
            .select("*")
            .order("name", Order::Asc)
            .fetch()
            .await
    }

    #[instrument(skip(self))]
    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, BackendError> {
        self.from(PRODUCTS)
            .select(PRODUCT_SELECT)
            .eq("slug", slug)
            .maybe_single()
            .await
    }

    #[instrument(skip(self), fields(category = %category, exclude = %exclude))]
    async fn related_products(
        &self,
        category: &CategoryId,
        exclude: &ProductId,
        limit: usize,
    ) -> Result<Vec<Product>, BackendError> {
        self.from(PRODUCTS)
            .select(PRODUCT_SELECT)
            .eq("category_id", category)
            .neq("id", exclude)
            .limit(limit)
            .fetch()
            .await
    }

    async fn ping(&self) -> Result<(), BackendError> {
        self.from(CATEGORIES)
            .select("id")
            .limit(1)
            .fetch::<serde_json::Value>()
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl WishlistStore for SupabaseClient {
    #[instrument(skip(self), fields(user = %user))]
    async fn wishlist_product_ids(
        &self,
        user: &AnonymousUserId,
    ) -> Result<HashSet<ProductId>, BackendError> {
        let rows: Vec<WishlistProductRef> = self
            .from(WISHLISTS)
            .select("product_id")
            .eq("user_id", user)
            .fetch()
            .await?;
        Ok(rows.into_iter().map(|row| row.product_id).collect())
    }

    #[instrument(skip(self), fields(user = %user, product = %product))]
    async fn wishlist_contains(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<bool, BackendError> {
        // Duplicate rows are possible, so count instead of expecting one
        let rows: Vec<WishlistProductRef> = self
            .from(WISHLISTS)
            .select("product_id")
            .eq("user_id", user)
            .eq("product_id", product)
            .limit(1)
            .fetch()
            .await?;
        Ok(!rows.is_empty())
    }

    #[instrument(skip(self), fields(user = %user, product = %product))]
    async fn add_to_wishlist(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<(), BackendError> {
        let row = NewWishlistEntry {
            user_id: user.clone(),
            product_id: product.clone(),
        };
        self.from(WISHLISTS).insert(&row).await
    }

    #[instrument(skip(self), fields(user = %user, product = %product))]
    async fn remove_from_wishlist(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<(), BackendError> {
        self.from(WISHLISTS)
            .eq("user_id", user)
            .eq("product_id", product)
            .delete()
            .await
    }
}
