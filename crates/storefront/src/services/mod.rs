//! Business logic services for storefront.
//!
//! # Services
//!
//! - `catalog` - Page data assembly (catalog listing, product detail)
//! - `wishlist` - Per-visitor saved products with optimistic toggling

pub mod catalog;
pub mod wishlist;

pub use catalog::{CatalogSnapshot, ProductDetail, load_catalog, load_product_detail};
pub use wishlist::{WishlistChange, WishlistController, WishlistToggle};
