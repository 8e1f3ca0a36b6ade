//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Catalog (q, category, brand, kind)
//! GET  /product/{slug}    - Product detail (unknown slug redirects to /)
//! POST /wishlist/toggle   - Toggle wishlist membership, 303 back
//! ```
//!
//! Health checks and static files are mounted in [`crate::app`].

pub mod home;
pub mod products;
pub mod views;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the page routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/product/{slug}", get(products::show))
        .route("/wishlist/toggle", post(wishlist::toggle))
}
