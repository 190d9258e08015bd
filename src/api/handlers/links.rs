//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, Uri},
};

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, OkResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::serving_host;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com", "code": "promo24" }
/// ```
///
/// `code` is optional; when absent or empty a 6-character code is generated.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, an invalid or self-referential
/// URL, or a malformed code.
/// Returns 409 Conflict if the custom code is taken.
/// Returns 500 Internal Server Error on store failures.
pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    let url = payload
        .url
        .ok_or_else(|| AppError::bad_request("Invalid URL"))?;

    let host = serving_host(&headers, &uri);
    let link = state
        .link_service
        .create_link(&url, payload.code, host.as_deref())
        .await?;

    tracing::info!(code = %link.code, url = %link.url, "Link created");

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns one link with its click statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Deletes a link permanently.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<OkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    tracing::info!(code = %code, "Link deleted");

    Ok(Json(OkResponse { ok: true }))
}
