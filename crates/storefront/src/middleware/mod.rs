//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span from [`make_request_span`])
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and sniffing protection)
//! 5. Visitor (anonymous id cookie)

pub mod request_id;
pub mod security_headers;
pub mod visitor;

pub use request_id::{make_request_span, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use visitor::{VISITOR_COOKIE_NAME, Visitor, visitor_middleware};
