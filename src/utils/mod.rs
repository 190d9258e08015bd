//! Helpers shared by the service and the HTTP layer.
//!
//! - [`code_generator`] - Short code generation, format and reserved-name checks
//! - [`url_normalizer`] - Target URL normalization and acceptance
//! - [`extract_host`] - Serving host from request headers

pub mod code_generator;
pub mod extract_host;
pub mod url_normalizer;
