//! Session value and navigation guard.

use serde::{Deserialize, Serialize};

use crate::api::dto::auth::LoginResponse;
use crate::domain::entities::UserId;

/// Credentials kept by the client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user_id: UserId,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            access_token: resp.access_token,
            user_id: resp.user_id,
        }
    }
}

/// Screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
}

/// Returns the view to show when `requested` is asked for.
///
/// Signed-in users are sent from the login and register screens to the
/// dashboard; anonymous users are sent from the dashboard to login.
pub fn guard(requested: View, session: Option<&Session>) -> View {
    match (requested, session) {
        (View::Login | View::Register, Some(_)) => View::Dashboard,
        (View::Dashboard, None) => View::Login,
        (view, _) => view,
    }
}
