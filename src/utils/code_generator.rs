//! Short code generation and validation utilities.
//!
//! Codes are drawn from the 62-symbol alphanumeric alphabet. Custom codes must
//! match `^[A-Za-z0-9]{6,8}$` and must not be shadowed by an internal route.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Length of auto-generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Compiled regex for custom code validation.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("code regex is valid"));

/// Single-segment paths owned by internal routes.
const RESERVED_NAMES: &[&str] = &["healthz", "code"];

/// Prefix owned by the JSON API.
const RESERVED_PREFIX: &str = "api";

/// Generates a random alphanumeric code of `length` characters.
///
/// Uses the thread-local CSPRNG. With the default length the keyspace is 62^6,
/// so collisions are rare but still possible; callers insert with
/// create-if-absent and retry.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(DEFAULT_CODE_LENGTH);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if a single-segment path belongs to an internal route and can
/// never be served as a redirect.
pub fn is_reserved(segment: &str) -> bool {
    segment.starts_with(RESERVED_PREFIX) || RESERVED_NAMES.contains(&segment)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Exactly 6-8 characters from `[A-Za-z0-9]`
/// - Must not start with `api` or equal `healthz`, since such a code could never
///   be redirected
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request("Code must match [A-Za-z0-9]{6,8}"));
    }

    if is_reserved(code) {
        return Err(AppError::bad_request("This code is reserved"));
    }

    Ok(())
}
