//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Web UI (`index.html` from the static directory)
//! - `GET  /static/*`  - UI assets
//! - `GET  /health`    - Health check
//! - `POST /shorten`   - Create or reuse a short link
//! - `GET  /urls`      - Link history, newest first
//! - `GET  /{code}`    - Short link redirect
//!
//! Static segments take priority over `/{code}`, and generated codes are long
//! enough never to equal `urls`, `health` or `static`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, for a UI hosted elsewhere
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory holding `index.html` and the UI assets
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    let static_dir = static_dir.as_ref();

    let router = Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/health", get(health_handler))
        .merge(api::routes::routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
