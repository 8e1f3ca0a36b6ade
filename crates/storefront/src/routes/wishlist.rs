//! Wishlist toggle route handler.

use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use d2c_market_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::services::WishlistController;
use crate::state::AppState;

/// Toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub product_id: String,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Flip the product's wishlist membership and redirect back.
///
/// The write is optimistic: a failed backend write is logged and the
/// visitor is redirected anyway. The next page load shows what the backend
/// actually holds.
#[instrument(skip(state, visitor, form), fields(visitor = %visitor.0, product = %form.product_id))]
pub async fn toggle(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect> {
    let product_id = form.product_id.trim();
    if product_id.is_empty() {
        return Err(AppError::BadRequest("product_id is required".to_string()));
    }

    let mut wishlist = WishlistController::load(state.wishlist(), visitor.0).await;
    let toggle = wishlist.toggle(ProductId::from(product_id)).await;

    add_breadcrumb(
        "wishlist",
        "Toggled wishlist",
        &[
            ("product_id", toggle.product_id.as_str()),
            ("change", toggle.change.as_str()),
            ("persisted", if toggle.is_persisted() { "true" } else { "false" }),
        ],
    );

    Ok(Redirect::to(safe_return_to(form.return_to.as_deref())))
}

/// Only same-site absolute paths are followed; anything else goes home.
fn safe_return_to(target: Option<&str>) -> &str {
    match target {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}
