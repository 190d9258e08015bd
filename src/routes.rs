//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /healthz`   - Liveness and version
//! - `/api/*`          - JSON link management API
//! - `GET  /{code}`    - Short link redirect
//! - anything else     - JSON 404
//!
//! # Precedence
//!
//! Static routes win over `/{code}`. Single-segment paths that belong to an
//! internal route (`api…`, `healthz`, `code`) are refused by the redirect
//! handler itself, so they never reach the store as codes.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin
//! - **Body limit** - JSON bodies up to 1 MiB

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

/// Maximum accepted request body size.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Constructs the application router with all routes and middleware.
///
/// Trailing-slash normalization is applied by the server around this router,
/// see [`crate::server::run`].
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .route("/{code}", get(redirect_handler))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors::layer())
        .layer(tracing::layer())
}
