//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink, UserId};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::json;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link with `visit_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link the given owner already created for `original_url`.
    ///
    /// Used to return the existing record instead of minting a second code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_owner_and_url(
        &self,
        owner_id: UserId,
        original_url: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Lists all links of an owner, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Link>, AppError>;

    /// Atomically increments `visit_count` of the link with `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the incremented counter
    /// - `Ok(None)` if no link has this code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record_visit(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Counts all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}

/// Conflict returned when a short code is already in use.
pub fn code_taken(code: &str) -> AppError {
    AppError::conflict("Short code is already taken", json!({ "code": code }))
}
