//! Session token signing and verification (HS256 JWT).
//!
//! Tokens are stateless: the server keeps only the signing secret. A token is
//! accepted while its signature is valid and `exp` lies in the future.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::UserId;
use crate::error::AppError;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string.
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Parses the subject back into a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the subject is not a number.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse().map_err(|_| {
            AppError::unauthorized(
                "Invalid or expired session",
                json!({ "reason": "Token subject is malformed" }),
            )
        })
    }
}

/// A freshly signed token with its metadata.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    /// Creates a signer for `secret` issuing tokens valid for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issues a token for `user_id` valid from now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user_id: UserId, username: &str) -> Result<IssuedToken, AppError> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Issues a token as if signed at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue_at(
        &self,
        user_id: UserId,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(
            |e| {
                tracing::error!(error = %e, "failed to sign session token");
                AppError::internal("Failed to create session", json!({}))
            },
        )?;

        Ok(IssuedToken {
            token,
            user_id,
            expires_at,
        })
    }

    /// Verifies signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, forged or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret-that-is-long-enough";

    fn signer() -> TokenSigner {
        TokenSigner::new(SECRET, Duration::hours(1))
    }

    #[test]
    fn test_issue_then_verify() {
        let signer = signer();
        let issued = signer.issue(42, "alice").unwrap();

        let claims = signer.verify(&issued.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let issued = signer
            .issue_at(42, "alice", Utc::now() - Duration::hours(2))
            .unwrap();

        let err = signer.verify(&issued.token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issued = TokenSigner::new(b"another-secret-of-sufficient-size!!", Duration::hours(1))
            .issue(42, "alice")
            .unwrap();

        assert!(signer().verify(&issued.token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let signer = signer();
        let issued = signer.issue(42, "alice").unwrap();

        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let forged_payload = issued.token.split('.').nth(2).unwrap().to_string();
        parts[1] = &forged_payload;

        assert!(signer.verify(&parts.join(".")).is_err());
        assert!(signer.verify("garbage").is_err());
        assert!(signer.verify("").is_err());
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains("test-signing-secret"));
    }
}
