//! Core types for D2C Market.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod catalog;
pub mod id;
pub mod price;
pub mod visitor;

pub use catalog::{Brand, Category, NewWishlistEntry, Product, WishlistEntry, WishlistProductRef};
pub use id::*;
pub use price::{Price, currency_symbol};
pub use visitor::{AnonymousUserId, AnonymousUserIdError};
