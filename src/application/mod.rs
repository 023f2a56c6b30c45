//! Application layer services.
//!
//! Services orchestrate repository calls and business rules behind a small API
//! consumed by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Create-or-reuse, redirect resolution, listing

pub mod services;
