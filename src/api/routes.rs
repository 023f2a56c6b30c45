//! API route configuration.

use crate::api::handlers::{list_urls_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON endpoints used by the web UI.
///
/// # Endpoints
///
/// - `POST /shorten` - Create or reuse a short link
/// - `GET  /urls`    - List all live links, newest first
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
}
