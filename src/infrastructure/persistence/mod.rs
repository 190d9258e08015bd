//! Link store implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL, durable
//! - [`InMemoryLinkRepository`] - process memory, used when no database is configured

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
