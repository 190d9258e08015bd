//! Serving host extraction from request metadata.

use axum::http::{HeaderMap, Uri, header};

/// Returns the host this request was addressed to, without the port.
///
/// Reads the `Host` header, falling back to the URI authority (HTTP/2 requests
/// carry it there). Handles:
/// - IPv6 literals, brackets kept (e.g., `[::1]:8080` → `[::1]`)
/// - Hostnames and IPv4 with ports (e.g., `example.com:3000` → `example.com`)
///
/// Returns `None` when neither source names a host, in which case the caller
/// cannot perform the self-redirect check.
pub fn serving_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let raw = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))?;

    let host = strip_port(raw.trim());
    (!host.is_empty()).then(|| host.to_string())
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    }
}
