//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};

/// Services and settings shared by all requests.
///
/// Cheap to clone: services sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    /// Adds the `Secure` attribute to session cookies.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(auth_service: AuthService, link_service: LinkService, cookie_secure: bool) -> Self {
        Self {
            auth_service: Arc::new(auth_service),
            link_service: Arc::new(link_service),
            cookie_secure,
        }
    }
}
