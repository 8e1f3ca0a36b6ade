//! Narrowing a fetched product list.
//!
//! Everything here is a pure function over data that is already in memory.
//! Criteria are applied as a sequence of independent predicates, so the
//! order in which they are combined never changes the result, and the
//! relative order of the input list is always preserved.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{BrandId, Category, CategoryId, Product, ProductId};

/// Selector narrowing products by one of their boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    #[default]
    All,
    Featured,
    Trending,
    New,
}

impl ProductKind {
    /// Every selector, in navigation order.
    pub const ALL: [Self; 4] = [Self::All, Self::Featured, Self::Trending, Self::New];

    /// Query-string value for this selector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Featured => "featured",
            Self::Trending => "trending",
            Self::New => "new",
        }
    }

    /// Human-readable heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Products",
            Self::Featured => "Featured",
            Self::Trending => "Trending",
            Self::New => "New Arrivals",
        }
    }

    /// Whether `product` carries the flag this selector asks for.
    #[must_use]
    pub const fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Featured => product.featured,
            Self::Trending => product.trending,
            Self::New => product.new_arrival,
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`ProductKind`] from a query string value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product kind {0:?} (expected all, featured, trending or new)")]
pub struct UnknownProductKind(pub String);

impl FromStr for ProductKind {
    type Err = UnknownProductKind;

    /// Parses case-insensitively; an empty value means [`ProductKind::All`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "featured" => Ok(Self::Featured),
            "trending" => Ok(Self::Trending),
            "new" => Ok(Self::New),
            _ => Err(UnknownProductKind(s.to_owned())),
        }
    }
}

/// The active narrowing criteria.
///
/// The default value has no active criteria and lets every product through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Free-text query; empty means inactive.
    pub query: String,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub kind: ProductKind,
}

impl ProductFilter {
    /// True when no criterion is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.category_id.is_none()
            && self.brand_id.is_none()
            && self.kind == ProductKind::All
    }

    /// Whether a single product passes every active criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_query(product)
            && self
                .category_id
                .as_ref()
                .is_none_or(|c| &product.category_id == c)
            && self
                .brand_id
                .as_ref()
                .is_none_or(|b| &product.brand_id == b)
            && self.kind.matches(product)
    }

    fn matches_query(&self, product: &Product) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        let contains = |field: Option<&str>| {
            field.is_some_and(|value| value.to_lowercase().contains(&needle))
        };

        contains(Some(&product.name))
            || contains(product.description.as_deref())
            || contains(product.brand_name())
            || contains(product.category_name())
    }
}

/// Products passing `filter`, in input order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// Number of products belonging to `category`.
#[must_use]
pub fn category_product_count(products: &[Product], category: &CategoryId) -> usize {
    products
        .iter()
        .filter(|p| &p.category_id == category)
        .count()
}

/// The first `limit` products of `category`, in input order.
#[must_use]
pub fn category_rail<'a>(
    products: &'a [Product],
    category: &CategoryId,
    limit: usize,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| &p.category_id == category)
        .take(limit)
        .collect()
}

/// Up to `limit` categories that have at least one product, in input order.
#[must_use]
pub fn populated_categories<'a>(
    categories: &'a [Category],
    products: &[Product],
    limit: usize,
) -> Vec<(&'a Category, usize)> {
    categories
        .iter()
        .take(limit)
        .map(|c| (c, category_product_count(products, &c.id)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Products whose ID is in `saved`, in input order.
#[must_use]
pub fn wishlisted<'a>(products: &'a [Product], saved: &HashSet<ProductId>) -> Vec<&'a Product> {
    products.iter().filter(|p| saved.contains(&p.id)).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::Brand;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: CategoryId::from(id),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
            icon: None,
            created_at: None,
        }
    }

    fn product(id: &str, name: &str, category_id: &str) -> Product {
        Product {
            id: ProductId::from(id),
            brand_id: BrandId::from("b-none"),
            category_id: CategoryId::from(category_id),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: None,
            short_description: None,
            price: Decimal::new(19_999, 2),
            currency: "USD".to_string(),
            image_url: None,
            images: Vec::new(),
            buy_url: None,
            featured: false,
            trending: false,
            new_arrival: false,
            created_at: None,
            updated_at: None,
            brand: None,
            category: None,
        }
    }

    fn with_brand(mut p: Product, id: &str, name: &str) -> Product {
        p.brand_id = BrandId::from(id);
        p.brand = Some(Brand {
            id: BrandId::from(id),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
            logo_url: None,
            website_url: None,
            founded_year: None,
            tagline: None,
            created_at: None,
        });
        p
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    /// A catalog exercising every field the query looks at.
    fn catalog() -> Vec<Product> {
        let mut phone = with_brand(product("p1", "Smartphone X", "c-mob"), "b-nova", "Nova");
        phone.category = Some(category("c-mob", "Mobiles"));
        phone.featured = true;

        let mut tablet = with_brand(product("p2", "Tablet Y", "c-tab"), "b-orbit", "Orbit");
        tablet.description = Some("Big screen for reading".to_string());
        tablet.trending = true;

        let mut buds = product("p3", "Air Buds", "c-aud");
        buds.category = Some(category("c-aud", "Headphones"));
        buds.new_arrival = true;
        buds.featured = true;

        let mut case = with_brand(product("p4", "Rugged Case", "c-mob"), "b-nova", "Nova");
        case.description = Some("Fits every PHONE in the Nova line".to_string());

        vec![phone, tablet, buds, case]
    }

    #[test]
    fn test_empty_filter_returns_everything_unchanged() {
        let products = catalog();
        let filter = ProductFilter::default();
        assert!(filter.is_empty());

        let result = filter_products(&products, &filter);
        assert_eq!(result.len(), products.len());
        assert!(result.iter().zip(&products).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_query_matches_substring_case_insensitively() {
        let products = vec![
            product("p1", "Smartphone X", "c1"),
            product("p2", "Tablet Y", "c1"),
        ];
        let filter = ProductFilter {
            query: "phone".to_string(),
            ..ProductFilter::default()
        };

        assert_eq!(ids(&filter_products(&products, &filter)), ["p1"]);

        let filter = ProductFilter {
            query: "SMART".to_string(),
            ..ProductFilter::default()
        };
        assert_eq!(ids(&filter_products(&products, &filter)), ["p1"]);
    }

    #[test]
    fn test_query_checks_description_brand_and_category() {
        let products = catalog();
        let by = |q: &str| {
            let filter = ProductFilter {
                query: q.to_string(),
                ..ProductFilter::default()
            };
            ids(&filter_products(&products, &filter))
        };

        assert_eq!(by("reading"), ["p2"]);
        assert_eq!(by("orbit"), ["p2"]);
        assert_eq!(by("headphones"), ["p3"]);
        assert_eq!(by("nova"), ["p1", "p4"]);
        assert_eq!(by("phone"), ["p1", "p3", "p4"]);
        assert!(by("toaster").is_empty());
    }

    #[test]
    fn test_query_partitions_the_input() {
        let products = catalog();
        let query = "o";
        let filter = ProductFilter {
            query: query.to_string(),
            ..ProductFilter::default()
        };
        let result = filter_products(&products, &filter);

        let field_hit = |p: &Product| {
            [
                Some(p.name.as_str()),
                p.description.as_deref(),
                p.brand_name(),
                p.category_name(),
            ]
            .into_iter()
            .flatten()
            .any(|f| f.to_lowercase().contains(query))
        };

        for p in &products {
            assert_eq!(result.contains(&p), field_hit(p), "product {}", p.id);
        }
    }

    #[test]
    fn test_missing_fields_do_not_match() {
        let products = vec![product("p1", "Widget", "c1")];
        let filter = ProductFilter {
            query: "nova".to_string(),
            ..ProductFilter::default()
        };
        assert!(filter_products(&products, &filter).is_empty());
    }

    #[test]
    fn test_category_filter_keeps_order() {
        let products = vec![
            product("first", "One", "A"),
            product("other", "Two", "B"),
            product("second", "Three", "A"),
        ];
        let filter = ProductFilter {
            category_id: Some(CategoryId::from("A")),
            ..ProductFilter::default()
        };

        let result = filter_products(&products, &filter);
        assert_eq!(ids(&result), ["first", "second"]);
        assert_eq!(
            result.len(),
            category_product_count(&products, &CategoryId::from("A"))
        );
    }

    #[test]
    fn test_category_filter_two_of_three() {
        let products = vec![
            product("a1", "Alpha", "A"),
            product("a2", "Beta", "A"),
            product("b1", "Gamma", "B"),
        ];
        let filter = ProductFilter {
            category_id: Some(CategoryId::from("A")),
            ..ProductFilter::default()
        };

        assert_eq!(ids(&filter_products(&products, &filter)), ["a1", "a2"]);
    }

    #[test]
    fn test_brand_filter() {
        let products = catalog();
        let filter = ProductFilter {
            brand_id: Some(BrandId::from("b-nova")),
            ..ProductFilter::default()
        };
        assert_eq!(ids(&filter_products(&products, &filter)), ["p1", "p4"]);
    }

    #[test]
    fn test_kind_filters_by_flag() {
        let products = catalog();
        let by = |kind| {
            let filter = ProductFilter {
                kind,
                ..ProductFilter::default()
            };
            ids(&filter_products(&products, &filter))
        };

        assert_eq!(by(ProductKind::Featured), ["p1", "p3"]);
        assert_eq!(by(ProductKind::Trending), ["p2"]);
        assert_eq!(by(ProductKind::New), ["p3"]);
        assert_eq!(by(ProductKind::All).len(), 4);
    }

    #[test]
    fn test_combined_criteria_commute() {
        let products = catalog();
        let by_category = ProductFilter {
            category_id: Some(CategoryId::from("c-mob")),
            ..ProductFilter::default()
        };
        let by_kind = ProductFilter {
            kind: ProductKind::Featured,
            ..ProductFilter::default()
        };
        let both = ProductFilter {
            category_id: Some(CategoryId::from("c-mob")),
            kind: ProductKind::Featured,
            ..ProductFilter::default()
        };

        let category_first: Vec<Product> = filter_products(&products, &by_category)
            .into_iter()
            .cloned()
            .collect();
        let kind_first: Vec<Product> = filter_products(&products, &by_kind)
            .into_iter()
            .cloned()
            .collect();

        let a = ids(&filter_products(&category_first, &by_kind));
        let b = ids(&filter_products(&kind_first, &by_category));
        let c = ids(&filter_products(&products, &both));
        assert_eq!(a, ["p1"]);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let products = catalog();
        let filter = ProductFilter {
            query: "nova".to_string(),
            ..ProductFilter::default()
        };
        assert_eq!(
            ids(&filter_products(&products, &filter)),
            ids(&filter_products(&products, &filter))
        );
    }

    #[test]
    fn test_product_kind_parsing() {
        assert_eq!("".parse::<ProductKind>(), Ok(ProductKind::All));
        assert_eq!("Featured".parse::<ProductKind>(), Ok(ProductKind::Featured));
        assert_eq!("new".parse::<ProductKind>(), Ok(ProductKind::New));
        assert!("bestseller".parse::<ProductKind>().is_err());
    }

    #[test]
    fn test_category_rail_limits_and_keeps_order() {
        let products: Vec<Product> = (0..15)
            .map(|i| product(&format!("p{i}"), "Item", if i % 2 == 0 { "A" } else { "B" }))
            .collect();
        let rail = category_rail(&products, &CategoryId::from("A"), 5);
        assert_eq!(ids(&rail), ["p0", "p2", "p4", "p6", "p8"]);
    }

    #[test]
    fn test_populated_categories_skips_empty() {
        let products = vec![product("p1", "One", "A"), product("p2", "Two", "A")];
        let categories = vec![category("A", "Audio"), category("B", "Bikes")];
        let grid = populated_categories(&categories, &products, 12);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.first().map(|(c, n)| (c.name.as_str(), *n)), Some(("Audio", 2)));
    }

    #[test]
    fn test_wishlisted_follows_catalog_order() {
        let products = catalog();
        let saved: HashSet<ProductId> = ["p4", "p1"].into_iter().map(ProductId::from).collect();
        assert_eq!(ids(&wishlisted(&products, &saved)), ["p1", "p4"]);
    }
}
