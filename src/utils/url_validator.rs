//! Validation of URLs submitted for shortening.
//!
//! URLs are stored exactly as submitted (minus surrounding whitespace) so the
//! redirect target matches what the owner typed.

use url::Url;

/// Longest URL accepted for shortening.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must be at most {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates that `input` is a well-formed absolute HTTP(S) URL.
///
/// Returns the trimmed input on success.
///
/// # Rules
///
/// 1. **Length**: non-empty, at most [`MAX_URL_LENGTH`] characters
/// 2. **Characters**: no control characters, since the URL is sent back
///    verbatim in the `Location` header
/// 3. **Protocol**: only `http` and `https`
/// 4. **Host**: must be present
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_url(" https://example.com ").unwrap(), "https://example.com");
/// assert!(validate_url("javascript:alert(1)").is_err());
/// assert!(validate_url("example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.chars().count() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    // The URL parser silently strips tabs and newlines, but a header value
    // cannot carry them
    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "control characters are not allowed".to_string(),
        ));
    }

    let url =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    Ok(trimmed.to_string())
}
