//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /auth/register`, `/auth/login`, `/auth/logout` - Accounts (public)
//! - `GET  /auth/me`, `POST|GET /urls`    - Session required
//! - `GET  /{code}`                       - Short link redirect (public)
//! - `GET  /health`                       - Store health check (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on `/auth/*`
//! - **Authentication** - Bearer header or `accessToken` cookie
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Router-level switches taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    /// Read the client IP from forwarding headers when rate limiting.
    /// Enable only behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Apply per-IP rate limits. Peer-address limiting needs the server to
    /// be run with connect info.
    pub rate_limit: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            behind_proxy: false,
            rate_limit: true,
        }
    }
}

/// Builds the router with all routes and middleware except path normalization.
pub fn build_router(state: AppState, options: RouterOptions) -> Router {
    let limited = |router: Router<AppState>, quota| {
        if options.rate_limit {
            rate_limit::apply(router, quota, options.behind_proxy)
        } else {
            router
        }
    };

    let auth_router = limited(api::routes::auth_routes(), rate_limit::CREDENTIALS);

    let protected = limited(
        api::routes::protected_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::layer,
        )),
        rate_limit::PUBLIC,
    );

    let public = limited(
        Router::new()
            .route("/{code}", get(redirect_handler))
            .route("/health", get(health_handler)),
        rate_limit::PUBLIC,
    );

    Router::new()
        .merge(auth_router)
        .merge(protected)
        .merge(public)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before routing.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `options` - rate limiting switches
pub fn app_router(state: AppState, options: RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, options))
}
