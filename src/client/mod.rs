//! Client side of the service: form state machines and a typed HTTP client.
//!
//! Forms are immutable values. Each `update` consumes the form and an action
//! and returns the next form plus the [`Effect`]s the caller should perform,
//! so the reducers stay free of I/O and are tested without a UI runtime.
//!
//! # Modules
//!
//! - [`register`] - Registration form
//! - [`login`] - Login form
//! - [`dashboard`] - Link creation and listing
//! - [`session`] - Session value and navigation guard
//! - [`api`] - `reqwest` client for the REST API

pub mod api;
pub mod dashboard;
pub mod login;
pub mod register;
pub mod session;

pub use api::{ApiClient, ClientError};
pub use dashboard::{Dashboard, DashboardAction};
pub use login::{LoginAction, LoginField, LoginForm};
pub use register::{RegisterAction, RegisterField, RegisterForm};
pub use session::{Session, View, guard};

use crate::api::dto::auth::{LoginRequest, RegisterRequest};
use crate::api::dto::links::ShortenRequest;

/// Side effect requested by a reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `POST /auth/register`
    SendRegister(RegisterRequest),
    /// `POST /auth/login`
    SendLogin(LoginRequest),
    /// `POST /urls`
    SendShorten(ShortenRequest),
    /// `GET /urls`
    LoadLinks,
    /// Keep the session for later requests.
    StoreSession(Session),
    /// Forget the session and call `POST /auth/logout`.
    ClearSession,
    Navigate(View),
    /// Show a blocking message to the user.
    Alert(String),
}
