//! Integration tests for the D2C Market storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront against a seeded backend
//! cargo run -p d2c-market-storefront
//!
//! # Run the ignored end-to-end tests
//! cargo test -p d2c-market-integration-tests -- --ignored
//! ```
//!
//! Set `STOREFRONT_BASE_URL` to point at a server other than
//! `http://localhost:3000`.

use d2c_market_core::AnonymousUserId;
use reqwest::Client;
use reqwest::header::{HeaderMap, SET_COOKIE};

/// Name of the cookie the storefront keeps the visitor ID in.
pub const VISITOR_COOKIE_NAME: &str = "d2c_visitor";

/// Base URL of the running storefront.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Client that keeps cookies across requests but never follows redirects,
/// so tests can assert on `303 See Other` responses directly.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn browser_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Extract the visitor ID from a response's `Set-Cookie` headers.
#[must_use]
pub fn visitor_from_set_cookie(headers: &HeaderMap) -> Option<AnonymousUserId> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == VISITOR_COOKIE_NAME)
        .and_then(|(_, value)| AnonymousUserId::parse(value.trim()).ok())
}

/// Whether a generated visitor ID has the shape the storefront mints.
#[must_use]
pub fn is_generated_visitor_id(id: &AnonymousUserId) -> bool {
    id.as_str()
        .strip_prefix(AnonymousUserId::PREFIX)
        .is_some_and(|suffix| {
            suffix.len() == AnonymousUserId::SUFFIX_LENGTH
                && suffix
                    .bytes()
                    .all(|b| AnonymousUserId::SUFFIX_ALPHABET.contains(&b))
        })
}
