//! DTOs for the `/urls` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /urls`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL to shorten (absolute http/https).
    #[serde(default, alias = "original_url")]
    #[validate(length(min = 1, message = "URL is required"))]
    pub original_url: String,

    /// Optional custom short code.
    #[serde(default, alias = "custom_code", skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
}

/// A created (or reused) short link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub code: String,
    #[serde(alias = "short_url")]
    pub short_url: String,
    #[serde(alias = "original_url")]
    pub original_url: String,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// One row of `GET /urls`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    #[serde(alias = "short_url")]
    pub short_url: String,
    #[serde(alias = "original_url")]
    pub original_url: String,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "visit_count")]
    pub visit_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_request_accepts_both_casings() {
        let camel: ShortenRequest =
            serde_json::from_str(r#"{"originalUrl":"https://a.com","customCode":"my-link"}"#)
                .unwrap();
        let snake: ShortenRequest =
            serde_json::from_str(r#"{"original_url":"https://a.com","custom_code":"my-link"}"#)
                .unwrap();

        assert_eq!(camel.original_url, snake.original_url);
        assert_eq!(camel.custom_code.as_deref(), Some("my-link"));
        assert_eq!(snake.custom_code.as_deref(), Some("my-link"));
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let req: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }
}
