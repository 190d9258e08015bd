//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_reserved;
use crate::utils::url_normalizer::encode_location;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reserved names (`api…`, `healthz`, `code`) answer 404 without a lookup
/// 2. Look up the code
/// 3. Count the click; the increment completes before the response is sent
/// 4. Return 302 Found with the percent-encoded target in `Location`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
/// Returns 500 Internal Server Error on store failures.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if is_reserved(&code) {
        return Err(AppError::not_found("Not found"));
    }

    let link = state.link_service.follow_link(&code).await?;

    let location = HeaderValue::from_str(&encode_location(&link.url)).map_err(|e| {
        tracing::error!(code = %code, error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Invalid stored URL")
    })?;

    tracing::debug!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Fallback for any path no route claims.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Not found")
}
