//! Display data shared by page templates.

use d2c_market_core::Product;

/// Shown when a product has no image.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/800x800/f5f5f5/999999?text=Product";

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub slug: String,
    pub name: String,
    /// Rounded, grouped price with currency symbol.
    pub price: String,
    pub image_url: String,
    pub buy_url: String,
    pub brand_name: Option<String>,
    pub category_name: Option<String>,
    pub featured: bool,
    pub trending: bool,
    pub new_arrival: bool,
    pub in_wishlist: bool,
    /// Render the wishlist toggle; off where membership is unknown.
    pub wishlist_enabled: bool,
}

impl ProductCardView {
    /// Card with a wishlist toggle reflecting `in_wishlist`.
    #[must_use]
    pub fn with_wishlist(product: &Product, in_wishlist: bool) -> Self {
        Self {
            in_wishlist,
            wishlist_enabled: true,
            ..Self::from(product)
        }
    }
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            price: product.price().display_rounded(),
            image_url: image_or_placeholder(product.image_url.as_deref()),
            buy_url: buy_url_or_anchor(product.buy_url.as_deref()),
            brand_name: product.brand_name().map(String::from),
            category_name: product.category_name().map(String::from),
            featured: product.featured,
            trending: product.trending,
            new_arrival: product.new_arrival,
            in_wishlist: false,
            wishlist_enabled: false,
        }
    }
}

/// Product detail display data for templates.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    /// Exact price with currency symbol.
    pub price: String,
    pub currency: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub image_url: String,
    /// Additional gallery images, excluding the main image.
    pub gallery: Vec<String>,
    pub buy_url: String,
    pub brand_name: Option<String>,
    pub category_id: String,
    pub category_name: Option<String>,
    pub featured: bool,
    pub trending: bool,
    pub new_arrival: bool,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let image_url = image_or_placeholder(product.image_url.as_deref());
        let gallery = product
            .images
            .iter()
            .filter(|url| !url.is_empty() && **url != image_url)
            .cloned()
            .collect();

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price().display_exact(),
            currency: product.currency.clone(),
            description: product.description.clone().filter(|d| !d.is_empty()),
            short_description: product.short_description.clone().filter(|d| !d.is_empty()),
            image_url,
            gallery,
            buy_url: buy_url_or_anchor(product.buy_url.as_deref()),
            brand_name: product.brand_name().map(String::from),
            category_id: product.category_id.to_string(),
            category_name: product.category_name().map(String::from),
            featured: product.featured,
            trending: product.trending,
            new_arrival: product.new_arrival,
        }
    }
}

fn image_or_placeholder(url: Option<&str>) -> String {
    url.filter(|u| !u.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}

fn buy_url_or_anchor(url: Option<&str>) -> String {
    url.filter(|u| !u.is_empty()).unwrap_or("#").to_string()
}
