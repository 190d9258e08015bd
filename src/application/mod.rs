//! Application layer services implementing business logic.
//!
//! Services consume the store trait and give HTTP handlers and the admin CLI one
//! entry point per operation.
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, deletion and redirects

pub mod services;
