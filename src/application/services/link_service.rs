//! Link creation, resolution and listing service.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use crate::domain::entities::{Link, NewLink, UserId};
use crate::domain::repositories::LinkRepository;
use crate::domain::repositories::link_repository::code_taken;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Attempts at finding a free generated code before giving up.
const MAX_ATTEMPTS: usize = 10;

/// Result of [`LinkService::shorten`].
#[derive(Debug, Clone)]
pub struct ShortenOutcome {
    pub link: Link,
    /// `false` when an existing link of the same owner was returned.
    pub created: bool,
}

/// Service for creating and resolving shortened links.
///
/// Handles URL validation, code generation/validation, and per-owner
/// deduplication so that re-submitting a URL returns the same code.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    public_base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `public_base_url` is the origin short URLs are served from,
    /// e.g. `https://snap.example.com`.
    pub fn new(links: Arc<dyn LinkRepository>, public_base_url: impl Into<String>) -> Self {
        Self {
            links,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Shortens `original_url` on behalf of `owner_id`.
    ///
    /// # Deduplication
    ///
    /// If the owner already shortened the same URL, the existing link is
    /// returned with `created = false`.
    ///
    /// # Code Generation
    ///
    /// - If `custom_code` is provided, validates and uses it (or returns conflict error)
    /// - Otherwise, generates a random 6-character alphanumeric code
    /// - Retries up to 10 times on collision, including collisions surfaced by
    ///   the store's unique constraint, before failing
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is invalid.
    /// Returns [`AppError::Conflict`] if the custom code already exists.
    #[instrument(name = "links.shorten", skip(self, custom_code))]
    pub async fn shorten(
        &self,
        owner_id: UserId,
        original_url: &str,
        custom_code: Option<String>,
    ) -> Result<ShortenOutcome, AppError> {
        let original_url = validate_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self
            .links
            .find_by_owner_and_url(owner_id, &original_url)
            .await?
        {
            tracing::debug!(code = %existing.code, "returning existing link");
            return Ok(ShortenOutcome {
                link: existing,
                created: false,
            });
        }

        let link = match custom_code {
            Some(custom) => self.create_with_custom_code(owner_id, original_url, custom).await?,
            None => self.create_with_generated_code(owner_id, original_url).await?,
        };

        tracing::info!(code = %link.code, owner_id, "short link created");
        Ok(ShortenOutcome {
            link,
            created: true,
        })
    }

    /// Resolves a short code to its original URL, counting the visit.
    ///
    /// The increment is applied atomically by the store, so concurrent
    /// redirects never lose a count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .links
            .record_visit(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        tracing::debug!(code, visits = link.visit_count, "short link resolved");
        Ok(link.original_url)
    }

    /// Returns every link owned by `owner_id`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Link>, AppError> {
        self.links.list_by_owner(owner_id).await
    }

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.links.count().await
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base_url, code)
    }

    async fn create_with_custom_code(
        &self,
        owner_id: UserId,
        original_url: String,
        custom: String,
    ) -> Result<Link, AppError> {
        validate_custom_code(&custom)?;

        if self.links.find_by_code(&custom).await?.is_some() {
            return Err(code_taken(&custom));
        }

        self.links
            .create(NewLink {
                code: custom,
                original_url,
                owner_id,
            })
            .await
    }

    async fn create_with_generated_code(
        &self,
        owner_id: UserId,
        original_url: String,
    ) -> Result<Link, AppError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code();

            if is_reserved(&code) {
                tracing::debug!(attempt, "generated code is a reserved route, retrying");
                continue;
            }

            if self.links.find_by_code(&code).await?.is_some() {
                tracing::debug!(attempt, "generated code collided, retrying");
                continue;
            }

            let new_link = NewLink {
                code,
                original_url: original_url.clone(),
                owner_id,
            };

            match self.links.create(new_link).await {
                Ok(link) => return Ok(link),
                // Lost a race with a concurrent insert of the same code
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "generated code taken concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::memory::MemoryLinkRepository;
    use crate::utils::code_generator::CODE_LENGTH;
    use chrono::Utc;
    use std::collections::HashSet;

    fn create_test_link(id: i64, code: &str, url: &str, owner_id: UserId) -> Link {
        Link::new(id, code.to_string(), url.to_string(), owner_id, Utc::now(), 0)
    }

    fn memory_service() -> LinkService {
        LinkService::new(Arc::new(MemoryLinkRepository::new()), "https://s.example.com/")
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_owner_and_url()
            .withf(|owner, url| *owner == 1 && url == "https://example.com")
            .times(1)
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let created_link = create_test_link(10, "abc123", "https://example.com", 1);
        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code.len() == CODE_LENGTH && new_link.owner_id == 1)
            .times(1)
            .returning(move |_| Ok(created_link.clone()));

        let service = LinkService::new(Arc::new(mock_repo), "https://s.example.com");

        let outcome = service
            .shorten(1, "https://example.com", None)
            .await
            .unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.link.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_shorten_invalid_url() {
        let mock_repo = MockLinkRepository::new();
        let service = LinkService::new(Arc::new(mock_repo), "https://s.example.com");

        let err = service.shorten(1, "not-a-url", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service
            .shorten(1, "javascript:alert(1)", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_deduplicates_per_owner() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = create_test_link(5, "existing", "https://example.com", 1);
        mock_repo
            .expect_find_by_owner_and_url()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo), "https://s.example.com");

        let outcome = service
            .shorten(1, "https://example.com", None)
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.link.id, 5);
        assert_eq!(outcome.link.code, "existing");
    }

    #[tokio::test]
    async fn test_shorten_same_url_different_owners() {
        let service = memory_service();

        let a = service.shorten(1, "https://example.com", None).await.unwrap();
        let b = service.shorten(2, "https://example.com", None).await.unwrap();

        assert!(a.created && b.created);
        assert_ne!(a.link.code, b.link.code);
    }

    #[tokio::test]
    async fn test_shorten_with_custom_code() {
        let service = memory_service();

        let outcome = service
            .shorten(1, "https://example.com", Some("my-link".to_string()))
            .await
            .unwrap();

        assert_eq!(outcome.link.code, "my-link");
    }

    #[tokio::test]
    async fn test_shorten_custom_code_conflict() {
        let service = memory_service();

        service
            .shorten(1, "https://first.com", Some("taken123".to_string()))
            .await
            .unwrap();

        let err = service
            .shorten(2, "https://second.com", Some("taken123".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_shorten_invalid_custom_code() {
        let service = memory_service();

        let err = service
            .shorten(1, "https://example.com", Some("UPPER".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_owner_and_url()
            .returning(|_, _| Ok(None));

        let taken = create_test_link(1, "taken1", "https://other.com", 2);
        let mut lookups = 0;
        mock_repo.expect_find_by_code().times(2).returning(move |_| {
            lookups += 1;
            if lookups == 1 {
                Ok(Some(taken.clone()))
            } else {
                Ok(None)
            }
        });

        let created = create_test_link(2, "fresh1", "https://example.com", 1);
        mock_repo
            .expect_create()
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let service = LinkService::new(Arc::new(mock_repo), "https://s.example.com");

        let outcome = service
            .shorten(1, "https://example.com", None)
            .await
            .unwrap();
        assert_eq!(outcome.link.code, "fresh1");
    }

    #[tokio::test]
    async fn test_shorten_retries_when_insert_races() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_owner_and_url()
            .returning(|_, _| Ok(None));
        mock_repo.expect_find_by_code().returning(|_| Ok(None));

        let created = create_test_link(2, "fresh1", "https://example.com", 1);
        let mut inserts = 0;
        mock_repo.expect_create().times(2).returning(move |new_link| {
            inserts += 1;
            if inserts == 1 {
                Err(code_taken(&new_link.code))
            } else {
                Ok(created.clone())
            }
        });

        let service = LinkService::new(Arc::new(mock_repo), "https://s.example.com");

        let outcome = service
            .shorten(1, "https://example.com", None)
            .await
            .unwrap();
        assert_eq!(outcome.link.id, 2);
    }

    #[tokio::test]
    async fn test_shorten_gives_up_after_max_attempts() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_owner_and_url()
            .returning(|_, _| Ok(None));
        let taken = create_test_link(1, "taken1", "https://other.com", 2);
        mock_repo
            .expect_find_by_code()
            .times(MAX_ATTEMPTS)
            .returning(move |_| Ok(Some(taken.clone())));
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo), "https://s.example.com");

        let err = service
            .shorten(1, "https://example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_generated_codes_unique_over_many_urls() {
        let service = memory_service();
        let mut codes = HashSet::new();

        for i in 0..500 {
            let outcome = service
                .shorten(1, &format!("https://example.com/page/{i}"), None)
                .await
                .unwrap();
            assert!(outcome.created);
            codes.insert(outcome.link.code);
        }

        assert_eq!(codes.len(), 500);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let service = memory_service();

        let err = service.resolve("nope42").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_increments_visit_count_by_one() {
        let service = memory_service();
        let outcome = service
            .shorten(1, "https://example.com", None)
            .await
            .unwrap();
        let code = outcome.link.code;

        for expected in 1..=3 {
            let url = service.resolve(&code).await.unwrap();
            assert_eq!(url, "https://example.com");

            let links = service.list_for_owner(1).await.unwrap();
            assert_eq!(links[0].visit_count, expected);
        }
    }

    #[tokio::test]
    async fn test_list_for_owner_most_recent_first() {
        let service = memory_service();

        service.shorten(1, "https://a.com", None).await.unwrap();
        service.shorten(2, "https://other.com", None).await.unwrap();
        service.shorten(1, "https://b.com", None).await.unwrap();
        service.shorten(1, "https://c.com", None).await.unwrap();

        let links = service.list_for_owner(1).await.unwrap();
        let urls: Vec<&str> = links.iter().map(|l| l.original_url.as_str()).collect();

        assert_eq!(urls, vec!["https://c.com", "https://b.com", "https://a.com"]);
        assert!(links.iter().all(|l| l.owner_id == 1));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service = memory_service();
        assert_eq!(service.short_url("abc123"), "https://s.example.com/abc123");
    }
}
