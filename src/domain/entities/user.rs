//! User entity.

use chrono::{DateTime, Utc};

/// Store-assigned user identifier.
pub type UserId = i64;

/// A registered account.
///
/// `password_hash` is an Argon2id PHC string; the plaintext password is never stored.
/// Users are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }
}

/// Input data for creating a user.
///
/// `email` is expected to be already lower-cased.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
