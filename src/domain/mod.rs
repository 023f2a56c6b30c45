//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`expiry_sweeper`] - Background retention policy for link records
//!
//! The domain layer has no dependency on infrastructure or presentation code.
//! Repository traits are implemented by `crate::infrastructure::persistence`.

pub mod entities;
pub mod expiry_sweeper;
pub mod repositories;
