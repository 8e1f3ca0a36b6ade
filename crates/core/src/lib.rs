//! D2C Market Core - Shared catalog types.
//!
//! This crate provides the types used by the D2C Market storefront:
//! - `storefront` - Public-facing catalog, product pages and wishlist
//! - `integration-tests` - End-to-end checks against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! HTTP clients. Everything here operates on data that has already been
//! fetched from the hosted backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the anonymous visitor ID, prices and catalog rows
//! - [`filter`] - Narrowing a fetched product list by query, category, brand and kind

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod filter;
pub mod types;

pub use filter::{
    ProductFilter, ProductKind, category_product_count, category_rail, filter_products,
    populated_categories, wishlisted,
};
pub use types::*;
