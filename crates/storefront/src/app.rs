//! Router assembly.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::{
    make_request_span, request_id_middleware, security_headers_middleware, visitor_middleware,
};
use crate::routes;
use crate::state::AppState;

/// Build the application router with all middleware except the Sentry
/// layers, which the binary adds outermost.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .merge(routes::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            visitor_middleware,
        ))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest_service("/static", static_dir)
        .fallback(not_found)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Unknown paths get a plain 404.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Readiness health check endpoint.
///
/// Verifies the backend answers a trivial query.
/// Returns 503 Service Unavailable if it does not.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
