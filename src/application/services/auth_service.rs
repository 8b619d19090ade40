//! Authentication service: registration, login and session verification.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::{Map, Value, json};
use tracing::instrument;
use validator::ValidateEmail;

use crate::domain::entities::{NewUser, User, UserId};
use crate::domain::repositories::UserRepository;
use crate::domain::repositories::user_repository::{email_taken, username_taken};
use crate::error::AppError;
use crate::utils::jwt::{IssuedToken, TokenSigner};
use crate::utils::password::{hash_password, verify_password};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum accepted username length, in characters.
pub const MAX_USERNAME_LENGTH: usize = 32;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("username pattern compiles"));

/// Shared message for unknown identifiers and wrong passwords.
const BAD_CREDENTIALS: &str = "Invalid username/email or password";

/// Checks registration input, collecting every field error.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with a `fields` map naming each rejected field.
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), AppError> {
    let mut fields = Map::new();

    let username = username.trim();
    if username.is_empty() {
        fields.insert("username".into(), json!("Username is required"));
    } else if username.chars().count() > MAX_USERNAME_LENGTH {
        fields.insert(
            "username".into(),
            json!(format!("Username must be at most {MAX_USERNAME_LENGTH} characters")),
        );
    } else if !USERNAME_REGEX.is_match(username) {
        fields.insert(
            "username".into(),
            json!("Username may only contain letters, digits, '_', '-' and '.'"),
        );
    }

    let email = email.trim();
    if email.is_empty() {
        fields.insert("email".into(), json!("Email is required"));
    } else if !email.validate_email() {
        fields.insert("email".into(), json!("Invalid email format"));
    }

    if password.trim().is_empty() {
        fields.insert("password".into(), json!("Password is required"));
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        fields.insert(
            "password".into(),
            json!(format!("Password must be at least {MIN_PASSWORD_LENGTH} characters")),
        );
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Registration input is invalid",
            json!({ "fields": Value::Object(fields) }),
        ))
    }
}

/// Service for account registration and session tokens.
///
/// Passwords are hashed with Argon2id on a blocking thread; sessions are
/// stateless HS256 tokens signed by [`TokenSigner`].
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    signer: TokenSigner,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - credential store
    /// - `signer` - token signer; its secret must stay stable across restarts
    ///   for issued sessions to survive
    pub fn new(users: Arc<dyn UserRepository>, signer: TokenSigner) -> Self {
        Self { users, signer }
    }

    /// Registers a new account.
    ///
    /// The email is stored lower-cased; username and email are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty fields, a malformed email, an
    /// invalid username or a short password.
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    #[instrument(name = "auth.register", skip_all, fields(username = %username))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        validate_registration(username, email, password)?;

        let username = username.trim().to_string();
        let email = email.trim().to_lowercase();

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(username_taken());
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(email_taken());
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing task failed");
                AppError::internal("Failed to hash password", json!({}))
            })??;

        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Authenticates by username or email and issues a session token.
    ///
    /// Identifiers containing `@` are looked up by email, others by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the identifier is unknown or the
    /// password does not match. Both cases produce the same message.
    #[instrument(name = "auth.login", skip_all, fields(identifier = %identifier))]
    pub async fn login(&self, identifier: &str, password: &str) -> Result<IssuedToken, AppError> {
        let identifier = identifier.trim();

        let user = if identifier.contains('@') {
            self.users.find_by_email(&identifier.to_lowercase()).await?
        } else {
            self.users.find_by_username(identifier).await?
        };

        let Some(user) = user else {
            tracing::warn!("login failed: unknown identifier");
            return Err(bad_credentials());
        };

        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password verification task failed");
                AppError::internal("Failed to verify password", json!({}))
            })??;

        if !matches {
            tracing::warn!(user_id = user.id, "login failed: wrong password");
            return Err(bad_credentials());
        }

        let issued = self.signer.issue(user.id, &user.username)?;
        tracing::info!(user_id = user.id, "user logged in");

        Ok(issued)
    }

    /// Verifies a session token and returns the embedded user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the signature is invalid or the
    /// token has expired.
    pub fn verify(&self, token: &str) -> Result<UserId, AppError> {
        self.signer.verify(token)?.user_id()
    }

    /// Loads the account behind a verified session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user no longer exists.
    pub async fn current_user(&self, user_id: UserId) -> Result<User, AppError> {
        self.users.find_by_id(user_id).await?.ok_or_else(|| {
            AppError::not_found("User not found", json!({ "user_id": user_id }))
        })
    }
}

fn bad_credentials() -> AppError {
    AppError::unauthorized(BAD_CREDENTIALS, json!({}))
}
