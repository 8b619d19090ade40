//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization with camelCase
//! keys (snake_case accepted on input) and validator for input validation.
//! They derive both directions so [`crate::client`] can reuse them.

pub mod auth;
pub mod health;
pub mod links;
