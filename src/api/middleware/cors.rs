//! Cross-origin access for browser front-ends served from other origins.

use tower_http::cors::CorsLayer;

/// Allows any origin, method and header.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
