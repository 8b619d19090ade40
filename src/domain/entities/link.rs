//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use super::UserId;

/// A short code mapped to the URL it redirects to.
///
/// `visit_count` is the only field mutated after creation; it is incremented
/// by exactly one per successful redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub visit_count: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        owner_id: UserId,
        created_at: DateTime<Utc>,
        visit_count: i64,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            owner_id,
            created_at,
            visit_count,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub owner_id: UserId,
}
