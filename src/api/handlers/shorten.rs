//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link, or returns the one already stored for the URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/a" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a",
///   "shortCode": "q7Yb2xKd",
///   "createdAt": "2024-05-01T12:00:00Z",
///   "clicks": 0
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is unreadable or `originalUrl` is
/// missing or empty. Returns 500 on storage failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Please provide a URL",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let original_url = payload.original_url.unwrap_or_default();
    let link = state.link_service.shorten(&original_url).await?;

    Ok(Json(link.into()))
}
