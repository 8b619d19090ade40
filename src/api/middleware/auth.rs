//! Session authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::domain::entities::UserId;
use crate::{error::AppError, state::AppState};

/// Cookie carrying the session token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie carrying the authenticated user's id, readable by scripts.
pub const USER_ID_COOKIE: &str = "userId";

/// Identity of the caller, inserted as a request extension by [`layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// Authenticates requests by session token.
///
/// # Token Sources
///
/// ```text
/// Authorization: Bearer <token>
/// Cookie: accessToken=<token>
/// ```
///
/// The `Authorization` header wins when both are present.
///
/// # Authentication Flow
///
/// 1. Extract token from the `Authorization` header, else from the cookie
/// 2. Verify signature and expiry
/// 3. Insert [`AuthUser`] into request extensions
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if no token is supplied or the token is
/// invalid or expired. The response carries `WWW-Authenticate: Bearer`.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/urls", get(list_links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => token,
        Err(_) => CookieJar::from_headers(&parts.headers)
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Session token is missing" }),
                )
            })?,
    };

    let user_id = st.auth_service.verify(&token)?;
    parts.extensions.insert(AuthUser { user_id });

    Ok(next.run(Request::from_parts(parts, body)).await)
}
