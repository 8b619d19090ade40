//! Login form.

use super::Effect;
use super::session::{Session, View};
use crate::api::dto::auth::LoginRequest;

/// Alert shown when the server rejects the credentials.
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Identifier,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub identifier: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.identifier.is_none() && self.password.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    Edit(LoginField, String),
    TogglePassword,
    Submit,
    Succeeded(Session),
    Failed(String),
}

/// Login by username or email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
    pub show_password: bool,
    pub is_loading: bool,
    pub errors: LoginErrors,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> LoginErrors {
        let mut errors = LoginErrors::default();

        if self.identifier.trim().is_empty() {
            errors.identifier = Some("Username or email is required.".into());
        }
        if self.password.trim().is_empty() {
            errors.password = Some("Password is required.".into());
        }

        errors
    }

    pub fn update(mut self, action: LoginAction) -> (Self, Vec<Effect>) {
        match action {
            LoginAction::Edit(LoginField::Identifier, value) => {
                self.identifier = value;
                (self, vec![])
            }
            LoginAction::Edit(LoginField::Password, value) => {
                self.password = value;
                (self, vec![])
            }
            LoginAction::TogglePassword => {
                self.show_password = !self.show_password;
                (self, vec![])
            }
            LoginAction::Submit => {
                if self.is_loading {
                    return (self, vec![]);
                }

                self.errors = self.validate();
                if !self.errors.is_empty() {
                    return (self, vec![]);
                }

                self.is_loading = true;
                let request = LoginRequest {
                    identifier: self.identifier.trim().to_string(),
                    password: self.password.clone(),
                };
                (self, vec![Effect::SendLogin(request)])
            }
            LoginAction::Succeeded(session) => {
                self.is_loading = false;
                self.password.clear();
                (
                    self,
                    vec![
                        Effect::StoreSession(session),
                        Effect::Navigate(View::Dashboard),
                    ],
                )
            }
            LoginAction::Failed(message) => {
                self.is_loading = false;
                (self, vec![Effect::Alert(message)])
            }
        }
    }
}
