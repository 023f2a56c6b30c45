//! Data Transfer Objects for API requests and responses.
//!
//! Field names follow the camelCase JSON contract consumed by the web UI.

pub mod health;
pub mod link;
pub mod shorten;
