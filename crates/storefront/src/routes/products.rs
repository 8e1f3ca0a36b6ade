//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use super::views::{ProductCardView, ProductDetailView};
use crate::filters;
use crate::middleware::Visitor;
use crate::services::load_product_detail;
use crate::state::AppState;

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub in_wishlist: bool,
    /// Rendered without wishlist toggles.
    pub related_products: Vec<ProductCardView>,
    pub return_to: String,
}

/// Display product detail page, or send the visitor home when the slug
/// matches nothing.
#[instrument(skip(state, visitor, uri), fields(visitor = %visitor.0))]
pub async fn show(
    State(state): State<AppState>,
    visitor: Visitor,
    uri: Uri,
    Path(slug): Path<String>,
) -> Response {
    let detail = load_product_detail(
        state.catalog(),
        state.wishlist(),
        &visitor.0,
        &slug,
        state.config().catalog.related_limit,
    )
    .await;

    let Some(detail) = detail else {
        return Redirect::to("/").into_response();
    };

    ProductShowTemplate {
        product: ProductDetailView::from(&detail.product),
        in_wishlist: detail.in_wishlist,
        related_products: detail.related.iter().map(ProductCardView::from).collect(),
        return_to: uri.path().to_string(),
    }
    .into_response()
}
