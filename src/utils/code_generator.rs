//! Short code generation and validation utilities.
//!
//! Generated codes are drawn from the OS-seeded thread RNG; custom codes
//! supplied by users are validated against routing and charset rules.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use serde_json::json;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 6;

/// Reserved codes that cannot be used as short links.
///
/// These collide with top-level routes of the service.
const RESERVED_CODES: &[&str] = &["auth", "urls", "health", "api", "admin", "login", "register"];

/// Generates a random alphanumeric short code of [`CODE_LENGTH`] characters.
///
/// 62^6 (about 5.7e10) possible codes; uniqueness is still enforced by the
/// caller against the store.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns true if `code` would be shadowed by a top-level route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any validation rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("my-link-2024").is_ok());
/// assert!(validate_custom_code("abc").is_err());     // Too short
/// assert!(validate_custom_code("MyCode").is_err());  // Uppercase
/// assert!(validate_custom_code("-promo").is_err());  // Starts with hyphen
/// assert!(validate_custom_code("urls").is_err());    // Reserved
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < 4 || code.len() > 32 {
        return Err(AppError::bad_request(
            "Custom code must be 4-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain lowercase letters, digits, and hyphens",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom code cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    if is_reserved(code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
