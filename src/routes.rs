//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /ajax/check-domain`    - Availability check
//! - `GET  /ajax/purchase-form`   - Purchase form
//! - `POST /ajax/purchase-domain` - Purchase
//! - `GET  /health`               - Health check: DB, cache, reseller, event queue
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on the purchase route
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The rate limiters key on the peer address; serve the router with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let lookup = api::routes::lookup_routes().layer(rate_limit::layer());
    let purchase = api::routes::purchase_routes().layer(rate_limit::purchase_layer());

    let router = Router::new()
        .merge(lookup)
        .merge(purchase)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
