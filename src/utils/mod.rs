//! Utility functions shared by services and handlers.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Validation of URLs submitted for shortening
//! - [`password`] - Argon2id password hashing
//! - [`jwt`] - Session token signing and verification
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod jwt;
pub mod password;
pub mod url_validator;
