//! Store trait definitions.
//!
//! Implementations live in `crate::infrastructure::persistence`. A `mockall`
//! mock is generated for unit tests.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
