//! Handlers for creating and listing the caller's short links.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::links::{LinkResponse, ShortenRequest, ShortenResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL for the authenticated user.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com", "customCode": "my-link" }
/// ```
///
/// `customCode` is optional.
///
/// # Response
///
/// `201 Created` for a new link, `200 OK` when the caller had already
/// shortened the same URL and the existing link is returned.
///
/// ```json
/// {
///   "code": "Ab3xYz",
///   "shortUrl": "http://localhost:3000/Ab3xYz",
///   "originalUrl": "https://example.com",
///   "createdAt": "2026-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL or custom code is invalid.
/// Returns 409 Conflict if the custom code is taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let outcome = state
        .link_service
        .shorten(user.user_id, &payload.original_url, payload.custom_code)
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let link = outcome.link;
    Ok((
        status,
        Json(ShortenResponse {
            short_url: state.link_service.short_url(&link.code),
            code: link.code,
            original_url: link.original_url,
            created_at: link.created_at,
        }),
    ))
}

/// Lists the authenticated user's links, most recent first.
///
/// # Endpoint
///
/// `GET /urls`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_for_owner(user.user_id).await?;

    let items = links
        .into_iter()
        .map(|link| LinkResponse {
            id: link.id,
            short_url: state.link_service.short_url(&link.code),
            code: link.code,
            original_url: link.original_url,
            created_at: link.created_at,
            visit_count: link.visit_count,
        })
        .collect();

    Ok(Json(items))
}
