//! PostgreSQL persistence.
//!
//! Concrete implementation of the domain repository trait using SQLx, plus the
//! pool constructor and the embedded schema migrations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, click counting and expiry purge

pub mod pg_link_repository;
pub mod pool;

pub use pg_link_repository::PgLinkRepository;
pub use pool::{connect_pool, run_migrations};
