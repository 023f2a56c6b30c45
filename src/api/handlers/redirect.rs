//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Bytes escaped in the `Location` header, on top of non-ASCII input.
const LOCATION: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes a stored URL so it is always a valid header value.
///
/// Existing `%XX` escapes and reserved characters are left untouched.
fn location_header(url: &str) -> Result<HeaderValue, AppError> {
    let encoded = utf8_percent_encode(url, LOCATION).to_string();

    HeaderValue::try_from(encoded).map_err(|e| {
        tracing::error!(error = %e, "Unencodable redirect target");
        AppError::internal("Internal server error", json!({}))
    })
}

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL, percent-encoded where
/// the raw text is not a legal header value. The click counter is
/// incremented before the response is sent.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown; nothing is modified in that case.
/// Returns 500 Internal Server Error on storage failure.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    tracing::debug!(%code, clicks = link.clicks, "Redirecting");

    let location = location_header(&link.original_url)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
