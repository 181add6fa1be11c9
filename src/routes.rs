//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /api/lookup`  - Vehicle lookup (access key required)
//! - `GET  /`            - Same lookup endpoint at the root path
//! - `GET  /health`      - Health check (public)
//!
//! Any other method on the lookup paths returns `405`, `HEAD` included; any
//! other method on `/health` returns `405`; any other path returns `404`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - `Access-Control-Allow-Origin: *` on every response
//! - **Access key** - `key` query parameter checked on lookup routes only

use crate::api::handlers::{
    health_handler, lookup_handler, method_not_allowed_handler, not_found_handler,
};
use crate::api::middleware::{api_key, cors, tracing};
use crate::state::AppState;
use axum::routing::{MethodRouter, get};
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// The access-key middleware is attached with `route_layer` before the
/// method fallback, so a request with a wrong method is answered with `405`
/// regardless of its key.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/lookup", lookup_route(&state))
        .route("/", lookup_route(&state))
        .route(
            "/health",
            get(health_handler).fallback(method_not_allowed_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// `get` also answers `HEAD`, so `HEAD` is routed explicitly to the `405`
/// handler. It is added after `route_layer` and skips the key check.
fn lookup_route(state: &AppState) -> MethodRouter<AppState> {
    get(lookup_handler)
        .route_layer(middleware::from_fn_with_state(state.clone(), api_key::layer))
        .head(method_not_allowed_handler)
        .fallback(method_not_allowed_handler)
}
