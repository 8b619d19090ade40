//! DTOs for the `/auth` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{User, UserId};
use crate::utils::jwt::IssuedToken;

/// Body of `POST /auth/register`.
///
/// Fields default to empty strings so a missing field is reported by
/// registration validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response of a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<User> for RegisterResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Body of `POST /auth/login`.
///
/// `identifier` is a username or an email address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default, alias = "username", alias = "email")]
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub identifier: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Session issued by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub access_token: String,
    #[serde(alias = "token_type")]
    pub token_type: String,
    #[serde(alias = "user_id")]
    pub user_id: UserId,
    #[serde(alias = "expires_at")]
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            access_token: issued.token,
            token_type: "Bearer".to_string(),
            user_id: issued.user_id,
            expires_at: issued.expires_at,
        }
    }
}

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_accepts_username_alias() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"secret1"}"#).unwrap();

        assert_eq!(req.identifier, "alice");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_request_missing_password_fails_validation() {
        let req: LoginRequest = serde_json::from_str(r#"{"identifier":"alice"}"#).unwrap();
        let errors = req.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_login_response_uses_camel_case() {
        let issued = IssuedToken {
            token: "t".to_string(),
            user_id: 3,
            expires_at: Utc::now(),
        };

        let value = serde_json::to_value(LoginResponse::from(issued)).unwrap();

        assert_eq!(value["accessToken"], "t");
        assert_eq!(value["tokenType"], "Bearer");
        assert_eq!(value["userId"], 3);
        assert!(value.get("expiresAt").is_some());
    }
}
