//! In-memory link storage.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink, UserId};
use crate::domain::repositories::LinkRepository;
use crate::domain::repositories::link_repository::code_taken;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_code: HashMap<String, Link>,
}

/// Link repository holding short links in process memory.
///
/// The write lock is held for the whole of `create` and `record_visit`,
/// so code uniqueness and counter increments cannot race.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.write().await;

        if inner.by_code.contains_key(&new_link.code) {
            return Err(code_taken(&new_link.code));
        }

        inner.next_id += 1;
        let link = Link::new(
            inner.next_id,
            new_link.code,
            new_link.original_url,
            new_link.owner_id,
            Utc::now(),
            0,
        );
        inner.by_code.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.inner.read().await.by_code.get(code).cloned())
    }

    async fn find_by_owner_and_url(
        &self,
        owner_id: UserId,
        original_url: &str,
    ) -> Result<Option<Link>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_code
            .values()
            .filter(|l| l.owner_id == owner_id && l.original_url == original_url)
            .min_by_key(|l| l.id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Link>, AppError> {
        let inner = self.inner.read().await;
        let mut links: Vec<Link> = inner
            .by_code
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(links)
    }

    async fn record_visit(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.by_code.get_mut(code).map(|link| {
            link.visit_count += 1;
            link.clone()
        }))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.by_code.len() as i64)
    }
}
