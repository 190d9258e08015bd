//! Infrastructure layer: concrete stores behind the domain's repository trait.
//!
//! - [`persistence`] - PostgreSQL and in-memory link stores

pub mod persistence;
