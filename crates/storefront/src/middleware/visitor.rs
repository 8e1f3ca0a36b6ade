//! Anonymous visitor identification.
//!
//! Every visitor gets a random [`AnonymousUserId`] persisted in a long-lived
//! cookie. There is no login: the id only correlates wishlist rows across
//! visits from the same browser.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use d2c_market_core::AnonymousUserId;
use rand::Rng;
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Cookie holding the visitor id.
pub const VISITOR_COOKIE_NAME: &str = "d2c_visitor";

/// Cookie lifetime (the longest browsers honour).
const VISITOR_COOKIE_MAX_AGE_DAYS: i64 = 400;

/// The current visitor's id, placed in request extensions by
/// [`visitor_middleware`].
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Visitor(visitor): Visitor) -> String {
///     format!("Hello, {visitor}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Visitor(pub AnonymousUserId);

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| AppError::Internal("visitor middleware not installed".to_string()))
    }
}

/// Middleware that identifies the visitor, minting a new id when the cookie
/// is absent or malformed.
///
/// The id is:
/// 1. Recorded in the current tracing span as `visitor`
/// 2. Inserted into request extensions for the [`Visitor`] extractor
/// 3. Set as a cookie on the response when newly minted
pub async fn visitor_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = visitor_from_headers(request.headers());
    let is_new = existing.is_none();
    let visitor = existing.unwrap_or_else(generate_visitor_id);

    Span::current().record("visitor", visitor.as_str());
    request.extensions_mut().insert(Visitor(visitor.clone()));

    let mut response = next.run(request).await;

    if is_new {
        let cookie = visitor_cookie(&visitor, state.config().is_secure());
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Read a well-formed visitor id from the request's `Cookie` headers.
fn visitor_from_headers(headers: &HeaderMap) -> Option<AnonymousUserId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == VISITOR_COOKIE_NAME)
        .and_then(|cookie| AnonymousUserId::parse(cookie.value()).ok())
}

/// Mint a fresh `user_` id with a random base-36 suffix.
fn generate_visitor_id() -> AnonymousUserId {
    let mut rng = rand::rng();
    let alphabet_len = AnonymousUserId::SUFFIX_ALPHABET.len();
    AnonymousUserId::from_suffix_indices(
        (0..AnonymousUserId::SUFFIX_LENGTH).map(|_| rng.random_range(0..alphabet_len)),
    )
}

fn visitor_cookie(visitor: &AnonymousUserId, secure: bool) -> Cookie<'static> {
    Cookie::build((VISITOR_COOKIE_NAME, visitor.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(VISITOR_COOKIE_MAX_AGE_DAYS))
        .build()
}
