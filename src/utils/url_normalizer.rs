//! Target URL normalization and acceptance rules.
//!
//! Normalization only decides on a scheme: explicit `http://`/`https://` input is
//! kept verbatim, a bare domain such as `example.com` gets `https://` prepended.
//! Acceptance then parses the result and applies the host rules, including the
//! self-redirect check against the host the service is answering on.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static BARE_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?:?$").expect("bare scheme regex is valid"));

static SCHEME_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme prefix regex is valid"));

/// Bytes escaped in a `Location` value besides controls and non-ASCII.
const LOCATION_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

static BARE_DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+\.\S+$").expect("bare domain regex is valid"));

/// Reasons a submitted URL is refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("a scheme alone is not a URL")]
    BareScheme,

    #[error("expected an http(s) URL or a bare domain")]
    Unrecognized,

    #[error("malformed URL: {0}")]
    InvalidFormat(String),

    #[error("host must be a domain name")]
    HostWithoutDot,

    #[error("only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL points back at this service")]
    SelfRedirect,
}

/// Normalizes raw user input into a URL string with an explicit scheme.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. `http`, `https`, `http:`, `https:` alone are rejected
/// 3. Input starting with `http://` or `https://` (any case) is returned as-is
/// 4. Input shaped like `<non-space>.<non-space>` gets `https://` prepended
/// 5. Anything else is rejected
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://a.io/x").unwrap(), "http://a.io/x");
/// assert!(normalize_url("https").is_err());
/// ```
pub fn normalize_url(raw: &str) -> Result<String, UrlValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if BARE_SCHEME_REGEX.is_match(trimmed) {
        return Err(UrlValidationError::BareScheme);
    }

    if SCHEME_PREFIX_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    if BARE_DOMAIN_REGEX.is_match(trimmed) {
        return Ok(format!("https://{trimmed}"));
    }

    Err(UrlValidationError::Unrecognized)
}

/// Checks that a normalized URL is an acceptable redirect target.
///
/// The hostname must contain a dot, the scheme must be HTTP or HTTPS, and the
/// hostname must differ from `serving_host` (compared case-insensitively). When
/// `serving_host` is `None` the self-redirect check is skipped.
///
/// # Errors
///
/// Returns the first rule the URL breaks.
pub fn validate_target_url(
    normalized: &str,
    serving_host: Option<&str>,
) -> Result<(), UrlValidationError> {
    let url =
        Url::parse(normalized).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    let host = match url.host_str() {
        Some(host) if host.contains('.') => host,
        _ => return Err(UrlValidationError::HostWithoutDot),
    };

    if serving_host.is_some_and(|own| host.eq_ignore_ascii_case(own)) {
        return Err(UrlValidationError::SelfRedirect);
    }

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(UrlValidationError::UnsupportedProtocol),
    }
}

/// Percent-encodes a stored target URL for use as a `Location` header.
///
/// Control characters, space, non-ASCII and the characters that are never
/// legal in a URL become `%XX`. Existing escapes and URL delimiters are kept,
/// so an already clean URL comes back unchanged.
pub fn encode_location(url: &str) -> String {
    utf8_percent_encode(url, LOCATION_ESCAPE).to_string()
}
