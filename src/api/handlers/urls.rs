//! Handler for the link history listing.

use axum::{Json, extract::State};

use crate::api::dto::link::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every live link, newest first.
///
/// # Endpoint
///
/// `GET /urls`
///
/// # Errors
///
/// Returns 500 Internal Server Error on storage failure.
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_all().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}
