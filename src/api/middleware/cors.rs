//! Cross-origin access for the web UI.

use tower_http::cors::CorsLayer;

/// Allows any origin, method and header.
///
/// The UI may be served from a different origin than the API (for instance a
/// dev server), and the API carries no credentials.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
