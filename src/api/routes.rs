//! API route configuration.
//!
//! Credential endpoints are public; link management requires a session via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, list_links_handler, login_handler, logout_handler, me_handler,
    register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Account routes that do not require a session.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login`    - Open a session
/// - `POST /auth/logout`   - Clear session cookies
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
}

/// Routes protected by session authentication.
///
/// # Endpoints
///
/// - `GET  /auth/me` - Current account
/// - `POST /urls`    - Shorten a URL
/// - `GET  /urls`    - List own links
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route("/urls", post(create_link_handler).get(list_links_handler))
}
