//! Handlers for account registration and session management.

use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use validator::Validate;

use crate::api::dto::auth::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
};
use crate::api::middleware::auth::{ACCESS_TOKEN_COOKIE, AuthUser, USER_ID_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "secret1" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "id": 1, "username": "alice", "email": "alice@example.com" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with per-field details if validation fails.
/// Returns 409 Conflict if the username or email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = state
        .auth_service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Authenticates by username or email and opens a session.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Request Body
///
/// ```json
/// { "identifier": "alice", "password": "secret1" }
/// ```
///
/// # Response
///
/// The token is returned in the body and set as the `accessToken` cookie
/// (`HttpOnly`). The `userId` cookie is readable by scripts.
///
/// ```json
/// {
///   "accessToken": "eyJhbGciOi...",
///   "tokenType": "Bearer",
///   "userId": 1,
///   "expiresAt": "2026-01-02T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized on unknown identifier or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    payload.validate()?;

    let issued = state
        .auth_service
        .login(&payload.identifier, &payload.password)
        .await?;

    let token_cookie = Cookie::build((ACCESS_TOKEN_COOKIE, issued.token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax);

    let user_cookie = Cookie::build((USER_ID_COOKIE, issued.user_id.to_string()))
        .path("/")
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax);

    let jar = jar.add(token_cookie).add(user_cookie);

    Ok((jar, Json(issued.into())))
}

/// Ends the browser session by clearing both session cookies.
///
/// # Endpoint
///
/// `POST /auth/logout`
///
/// Tokens are stateless, so a copy of the token kept elsewhere stays valid
/// until it expires.
pub async fn logout_handler(jar: CookieJar) -> (StatusCode, CookieJar) {
    let jar = jar
        .remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(USER_ID_COOKIE).path("/"));

    (StatusCode::NO_CONTENT, jar)
}

/// Returns the authenticated account.
///
/// # Endpoint
///
/// `GET /auth/me`
///
/// # Errors
///
/// Returns 401 Unauthorized without a valid session.
/// Returns 404 Not Found if the account no longer exists.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>, AppError> {
    let user = state.auth_service.current_user(user.user_id).await?;

    Ok(Json(user.into()))
}
