//! Core domain entities.
//!
//! Entities are plain data structures without persistence logic. Creation input
//! lives in a separate struct ([`NewLink`]) so the storage layer owns the
//! generated columns (`id`, `created_at`, `clicks`).

pub mod link;

pub use link::{Link, NewLink};
