//! Catalog (home) page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::Uri,
};
use d2c_market_core::{
    BrandId, CategoryId, Product, ProductFilter, ProductKind, category_rail, filter_products,
    populated_categories, wishlisted,
};
use serde::Deserialize;
use tracing::instrument;

use super::views::ProductCardView;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::Visitor;
use crate::services::{CatalogSnapshot, load_catalog};
use crate::state::AppState;

/// Maximum number of tiles in the category grid.
const CATEGORY_GRID_LIMIT: usize = 12;

/// Catalog query parameters.
///
/// Blank values (as submitted by an untouched form) mean "no criterion".
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub kind: String,
}

impl CatalogQuery {
    /// Convert to filter criteria.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown `kind`.
    pub fn to_filter(&self) -> Result<ProductFilter> {
        let kind = self
            .kind
            .parse::<ProductKind>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(ProductFilter {
            query: self.q.trim().to_string(),
            category_id: non_blank(&self.category).map(CategoryId::from),
            brand_id: non_blank(&self.brand).map(BrandId::from),
            kind,
        })
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Catalog size shown in the page header.
pub struct CatalogStats {
    pub categories: usize,
    pub brands: usize,
    pub products: usize,
}

/// A choice in a filter dropdown or navigation list.
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A tile in the category grid.
pub struct CategoryTileView {
    pub id: String,
    pub name: String,
    pub product_count: usize,
}

/// Products of one category, shown when no criterion is active.
pub struct CategoryRailView {
    pub id: String,
    pub name: String,
    pub products: Vec<ProductCardView>,
}

/// Filtered listing, shown when any criterion is active.
pub struct ResultsView {
    pub heading: String,
    pub products: Vec<ProductCardView>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub stats: CatalogStats,
    /// Current free-text query, echoed into the search box.
    pub search_query: String,
    pub category_options: Vec<FilterOption>,
    pub brand_options: Vec<FilterOption>,
    pub kind_options: Vec<FilterOption>,
    /// Empty while a text query is active.
    pub category_tiles: Vec<CategoryTileView>,
    pub results: Option<ResultsView>,
    /// Empty while any criterion is active.
    pub rails: Vec<CategoryRailView>,
    pub wishlist: Vec<ProductCardView>,
    /// Where wishlist toggles send the visitor back to.
    pub return_to: String,
}

/// Display the catalog page.
#[instrument(skip(state, visitor, uri), fields(visitor = %visitor.0))]
pub async fn home(
    State(state): State<AppState>,
    visitor: Visitor,
    uri: Uri,
    Query(query): Query<CatalogQuery>,
) -> Result<HomeTemplate> {
    let filter = query.to_filter()?;
    let snapshot = load_catalog(
        state.catalog(),
        state.wishlist(),
        &visitor.0,
        state.config().catalog,
    )
    .await;

    let return_to = uri
        .path_and_query()
        .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string());

    Ok(build_page(
        &snapshot,
        &filter,
        state.config().catalog.rail_limit,
        return_to,
    ))
}

fn build_page(
    snapshot: &CatalogSnapshot,
    filter: &ProductFilter,
    rail_limit: usize,
    return_to: String,
) -> HomeTemplate {
    let card = |product: &Product| {
        ProductCardView::with_wishlist(product, snapshot.wishlist.contains(&product.id))
    };

    let results = (!filter.is_empty()).then(|| ResultsView {
        heading: results_heading(snapshot, filter),
        products: filter_products(&snapshot.products, filter)
            .into_iter()
            .map(card)
            .collect(),
    });

    let category_tiles = if filter.query.is_empty() {
        populated_categories(&snapshot.categories, &snapshot.products, CATEGORY_GRID_LIMIT)
            .into_iter()
            .map(|(category, product_count)| CategoryTileView {
                id: category.id.to_string(),
                name: category.name.clone(),
                product_count,
            })
            .collect()
    } else {
        Vec::new()
    };

    let rails = if filter.is_empty() {
        snapshot
            .categories
            .iter()
            .filter_map(|category| {
                let products = category_rail(&snapshot.products, &category.id, rail_limit);
                (!products.is_empty()).then(|| CategoryRailView {
                    id: category.id.to_string(),
                    name: category.name.clone(),
                    products: products.into_iter().map(card).collect(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    let wishlist = wishlisted(&snapshot.products, &snapshot.wishlist)
        .into_iter()
        .map(card)
        .collect();

    HomeTemplate {
        stats: CatalogStats {
            categories: snapshot.categories.len(),
            brands: snapshot.brands.len(),
            products: snapshot.products.len(),
        },
        search_query: filter.query.clone(),
        category_options: snapshot
            .categories
            .iter()
            .map(|c| FilterOption {
                value: c.id.to_string(),
                label: c.name.clone(),
                selected: filter.category_id.as_ref() == Some(&c.id),
            })
            .collect(),
        brand_options: snapshot
            .brands
            .iter()
            .map(|b| FilterOption {
                value: b.id.to_string(),
                label: b.name.clone(),
                selected: filter.brand_id.as_ref() == Some(&b.id),
            })
            .collect(),
        kind_options: ProductKind::ALL
            .iter()
            .map(|k| FilterOption {
                value: k.as_str().to_string(),
                label: k.label().to_string(),
                selected: filter.kind == *k,
            })
            .collect(),
        category_tiles,
        results,
        rails,
        wishlist,
        return_to,
    }
}

/// Heading for the filtered listing: the query if any, otherwise the most
/// specific active criterion.
fn results_heading(snapshot: &CatalogSnapshot, filter: &ProductFilter) -> String {
    if !filter.query.is_empty() {
        return format!("Search Results for \u{201c}{}\u{201d}", filter.query);
    }
    if let Some(id) = &filter.category_id
        && let Some(category) = snapshot.categories.iter().find(|c| &c.id == id)
    {
        return category.name.clone();
    }
    if let Some(id) = &filter.brand_id
        && let Some(brand) = snapshot.brands.iter().find(|b| &b.id == id)
    {
        return brand.name.clone();
    }
    filter.kind.label().to_string()
}
