//! Public JSON representation of a link record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Link record as returned by `POST /shorten` and `GET /urls`.
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a",
///   "shortCode": "q7Yb2xKd",
///   "createdAt": "2024-05-01T12:00:00Z",
///   "clicks": 0
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            original_url: link.original_url,
            short_code: link.code,
            created_at: link.created_at,
            clicks: link.clicks,
        }
    }
}
