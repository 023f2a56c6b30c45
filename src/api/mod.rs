//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into [`crate::application::services::LinkService`]
//! calls and formats responses according to the JSON contract.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and CORS layers
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
