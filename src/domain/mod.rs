//! Domain layer: the link entity and the store contract.
//!
//! Nothing here depends on HTTP or on a particular storage engine.
//!
//! - [`entities`] - Link record and creation input
//! - [`repositories`] - The [`repositories::LinkRepository`] store trait

pub mod entities;
pub mod repositories;
