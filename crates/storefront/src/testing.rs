//! In-memory backend for handler and service tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use d2c_market_core::{
    AnonymousUserId, Brand, BrandId, Category, CategoryId, Product, ProductId,
};
use rust_decimal::Decimal;
use secrecy::SecretString;
use url::Url;

use crate::backend::{BackendError, CatalogBackend, WishlistStore};
use crate::config::{CatalogLimits, StorefrontConfig, SupabaseConfig};

/// A wishlist write observed by [`FakeBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistWrite {
    Insert(AnonymousUserId, ProductId),
    Delete(AnonymousUserId, ProductId),
}

/// Backend holding rows in memory and recording wishlist writes.
#[derive(Default)]
pub struct FakeBackend {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    rows: Mutex<Vec<(AnonymousUserId, ProductId)>>,
    writes: Mutex<Vec<WishlistWrite>>,
    fail_reads: bool,
    fail_wishlist: bool,
}

impl FakeBackend {
    /// Backend with two categories, two brands and three products:
    /// `p1` Smartphone X (mobiles, nova, featured), `p2` Tablet Y
    /// (tablets, nova, trending) and `p3` Phone Case (mobiles, orbit).
    pub fn seeded() -> Self {
        let mobiles = category("c1", "Mobiles");
        let tablets = category("c2", "Tablets");
        let nova = brand("b1", "Nova");
        let orbit = brand("b2", "Orbit");

        let mut x = product("p1", "Smartphone X", &mobiles, &nova);
        x.featured = true;
        x.description = Some("Flagship phone".to_string());
        let mut y = product("p2", "Tablet Y", &tablets, &nova);
        y.trending = true;
        let case = product("p3", "Phone Case", &mobiles, &orbit);

        Self {
            products: vec![x, y, case],
            categories: vec![mobiles, tablets],
            brands: vec![nova, orbit],
            ..Self::default()
        }
    }

    /// Pre-populate a wishlist row without recording a write.
    pub fn with_saved(self, user: &AnonymousUserId, product: &str) -> Self {
        self.rows
            .lock()
            .unwrap()
            .push((user.clone(), ProductId::from(product)));
        self
    }

    /// Make every catalog read fail.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every wishlist read and write fail. Writes are still recorded.
    pub fn failing_wishlist(mut self) -> Self {
        self.fail_wishlist = true;
        self
    }

    /// Wishlist writes issued so far, in order.
    pub fn writes(&self) -> Vec<WishlistWrite> {
        self.writes.lock().unwrap().clone()
    }

    fn check_reads(&self) -> Result<(), BackendError> {
        if self.fail_reads {
            return Err(unavailable());
        }
        Ok(())
    }

    fn check_wishlist(&self) -> Result<(), BackendError> {
        if self.fail_wishlist {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogBackend for FakeBackend {
    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, BackendError> {
        self.check_reads()?;
        Ok(self.products.iter().take(limit).cloned().collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        self.check_reads()?;
        Ok(self.categories.clone())
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, BackendError> {
        self.check_reads()?;
        Ok(self.brands.clone())
    }

    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, BackendError> {
        self.check_reads()?;
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }

    async fn related_products(
        &self,
        category: &CategoryId,
        exclude: &ProductId,
        limit: usize,
    ) -> Result<Vec<Product>, BackendError> {
        self.check_reads()?;
        Ok(self
            .products
            .iter()
            .filter(|p| &p.category_id == category && &p.id != exclude)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), BackendError> {
        self.check_reads()
    }
}

#[async_trait]
impl WishlistStore for FakeBackend {
    async fn wishlist_product_ids(
        &self,
        user: &AnonymousUserId,
    ) -> Result<HashSet<ProductId>, BackendError> {
        self.check_wishlist()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == user)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn wishlist_contains(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<bool, BackendError> {
        self.check_wishlist()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|(u, p)| u == user && p == product))
    }

    async fn add_to_wishlist(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<(), BackendError> {
        self.writes
            .lock()
            .unwrap()
            .push(WishlistWrite::Insert(user.clone(), product.clone()));
        self.check_wishlist()?;
        self.rows
            .lock()
            .unwrap()
            .push((user.clone(), product.clone()));
        Ok(())
    }

    async fn remove_from_wishlist(
        &self,
        user: &AnonymousUserId,
        product: &ProductId,
    ) -> Result<(), BackendError> {
        self.writes
            .lock()
            .unwrap()
            .push(WishlistWrite::Delete(user.clone(), product.clone()));
        self.check_wishlist()?;
        self.rows
            .lock()
            .unwrap()
            .retain(|(u, p)| !(u == user && p == product));
        Ok(())
    }
}

fn unavailable() -> BackendError {
    BackendError::Api {
        status: 503,
        code: None,
        message: "backend unavailable".to_string(),
    }
}

pub fn visitor(id: &str) -> AnonymousUserId {
    AnonymousUserId::parse(id).unwrap()
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: CategoryId::from(id),
        name: name.to_string(),
        slug: name.to_lowercase(),
        description: None,
        icon: None,
        created_at: None,
    }
}

pub fn brand(id: &str, name: &str) -> Brand {
    Brand {
        id: BrandId::from(id),
        name: name.to_string(),
        slug: name.to_lowercase(),
        description: None,
        logo_url: None,
        website_url: None,
        founded_year: None,
        tagline: None,
        created_at: None,
    }
}

pub fn product(id: &str, name: &str, category: &Category, brand: &Brand) -> Product {
    Product {
        id: ProductId::from(id),
        brand_id: brand.id.clone(),
        category_id: category.id.clone(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        short_description: None,
        price: Decimal::new(129_999, 0),
        currency: "INR".to_string(),
        image_url: None,
        images: Vec::new(),
        buy_url: Some(format!("https://shop.example.test/{id}")),
        featured: false,
        trending: false,
        new_arrival: false,
        created_at: None,
        updated_at: None,
        brand: Some(brand.clone()),
        category: Some(category.clone()),
    }
}

pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        static_dir: PathBuf::from("static"),
        supabase: SupabaseConfig {
            url: Url::parse("http://localhost:54321/").unwrap(),
            anon_key: SecretString::from("anon"),
            timeout: Duration::from_secs(1),
        },
        catalog: CatalogLimits::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}
