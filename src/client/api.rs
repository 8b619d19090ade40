//! Typed HTTP client for the REST API.

use reqwest::{Client, RequestBuilder, Response, StatusCode, header, redirect::Policy};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use super::session::Session;
use crate::api::dto::auth::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
};
use crate::api::dto::links::{LinkResponse, ShortenRequest, ShortenResponse};
use crate::error::ErrorBody;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error envelope (or a non-2xx status).
    #[error("{message} ({status})")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A redirect response without a usable `Location` header.
    #[error("redirect without location")]
    MissingLocation,
}

impl ClientError {
    /// HTTP status for [`ClientError::Api`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for one snaplink server.
///
/// Redirects are not followed so [`ApiClient::resolve`] can report the target.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the server at `base_url`, e.g. `http://localhost:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("snaplink/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        self.send_json(self.http.post(self.url("/auth/register")).json(req))
            .await
    }

    /// Logs in and returns the session to pass to authenticated calls.
    pub async fn login(&self, req: &LoginRequest) -> Result<Session, ClientError> {
        let resp: LoginResponse = self
            .send_json(self.http.post(self.url("/auth/login")).json(req))
            .await?;

        Ok(resp.into())
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.send(self.http.post(self.url("/auth/logout"))).await?;
        Ok(())
    }

    pub async fn me(&self, session: &Session) -> Result<MeResponse, ClientError> {
        self.send_json(
            self.http
                .get(self.url("/auth/me"))
                .bearer_auth(&session.access_token),
        )
        .await
    }

    pub async fn shorten(
        &self,
        session: &Session,
        req: &ShortenRequest,
    ) -> Result<ShortenResponse, ClientError> {
        self.send_json(
            self.http
                .post(self.url("/urls"))
                .bearer_auth(&session.access_token)
                .json(req),
        )
        .await
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<LinkResponse>, ClientError> {
        self.send_json(
            self.http
                .get(self.url("/urls"))
                .bearer_auth(&session.access_token),
        )
        .await
    }

    /// Follows a short code once and returns the redirect target.
    ///
    /// Counts as a visit on the server.
    pub async fn resolve(&self, code: &str) -> Result<String, ClientError> {
        let resp = self
            .send(self.http.get(self.url(&format!("/{code}"))))
            .await?;

        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(ClientError::MissingLocation)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        Ok(self.send(req).await?.json().await?)
    }

    /// Sends `req`, turning non-2xx/3xx answers into [`ClientError::Api`].
    async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() || status.is_redirection() {
            return Ok(resp);
        }

        let body = resp.bytes().await?;
        let (code, message) = match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => (error.code, error.message),
            Err(_) => (
                "unknown".to_string(),
                status.canonical_reason().unwrap_or("Request failed").to_string(),
            ),
        };

        tracing::debug!(%status, %code, "api call failed");
        Err(ClientError::Api {
            status,
            code,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url("/urls"), "http://localhost:3000/urls");
    }

    #[test]
    fn test_api_error_display_and_status() {
        let err = ClientError::Api {
            status: StatusCode::CONFLICT,
            code: "conflict".into(),
            message: "Email is already registered".into(),
        };

        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(err.to_string(), "Email is already registered (409 Conflict)");
    }
}
