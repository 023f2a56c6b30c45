//! DTOs for link shortening endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request to shorten a single URL.
///
/// Absent, `null` and empty `originalUrl` all fail validation. No URL syntax
/// check is applied; the web UI does that before submitting.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(required, length(min = 1, message = "Please provide a URL"))]
    pub original_url: Option<String>,
}
