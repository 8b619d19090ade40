//! Registration form.

use regex::Regex;
use std::sync::LazyLock;

use super::Effect;
use super::session::View;
use crate::api::dto::auth::RegisterRequest;
use crate::application::services::auth_service::MIN_PASSWORD_LENGTH;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Alert shown when the server rejects the registration.
pub const REGISTRATION_FAILED: &str =
    "Registration failed. Please check your input and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

/// Per-field messages from the last submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterErrors {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterAction {
    Edit(RegisterField, String),
    TogglePassword,
    ToggleConfirmPassword,
    Submit,
    /// The server answered `201 Created`.
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub show_password: bool,
    pub show_confirm_password: bool,
    pub is_loading: bool,
    pub errors: RegisterErrors,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the fields the way the server will, plus password confirmation.
    pub fn validate(&self) -> RegisterErrors {
        let mut errors = RegisterErrors::default();

        if self.username.trim().is_empty() {
            errors.username = Some("Username is required.".into());
        }

        if self.email.trim().is_empty() {
            errors.email = Some("Email is required.".into());
        } else if !EMAIL_REGEX.is_match(&self.email) {
            errors.email = Some("Invalid email format.".into());
        }

        if self.password.trim().is_empty() {
            errors.password = Some("Password is required.".into());
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.password = Some(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters."
            ));
        }

        if self.confirm_password.trim().is_empty() {
            errors.confirm_password = Some("Confirm password is required.".into());
        } else if self.password != self.confirm_password {
            errors.confirm_password = Some("Passwords don't match.".into());
        }

        errors
    }

    pub fn update(mut self, action: RegisterAction) -> (Self, Vec<Effect>) {
        match action {
            RegisterAction::Edit(field, value) => {
                match field {
                    RegisterField::Username => self.username = value,
                    RegisterField::Email => self.email = value,
                    RegisterField::Password => self.password = value,
                    RegisterField::ConfirmPassword => self.confirm_password = value,
                }
                (self, vec![])
            }
            RegisterAction::TogglePassword => {
                self.show_password = !self.show_password;
                (self, vec![])
            }
            RegisterAction::ToggleConfirmPassword => {
                self.show_confirm_password = !self.show_confirm_password;
                (self, vec![])
            }
            RegisterAction::Submit => {
                if self.is_loading {
                    return (self, vec![]);
                }

                self.errors = self.validate();
                if !self.errors.is_empty() {
                    return (self, vec![]);
                }

                self.is_loading = true;
                let request = RegisterRequest {
                    username: self.username.clone(),
                    email: self.email.clone(),
                    password: self.password.clone(),
                };
                (self, vec![Effect::SendRegister(request)])
            }
            RegisterAction::Succeeded => {
                self.is_loading = false;
                (self, vec![Effect::Navigate(View::Login)])
            }
            RegisterAction::Failed(message) => {
                self.is_loading = false;
                (self, vec![Effect::Alert(message)])
            }
        }
    }
}
