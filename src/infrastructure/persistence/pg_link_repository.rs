//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, UserId};
use crate::domain::repositories::LinkRepository;
use crate::domain::repositories::link_repository::code_taken;
use crate::error::AppError;
use crate::utils::db_error::unique_violation;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    original_url: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    visit_count: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.code,
            r.original_url,
            r.owner_id,
            r.created_at,
            r.visit_count,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Visit counting is a single `UPDATE ... RETURNING` statement, so the
/// increment and the lookup happen atomically.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, original_url, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, code, original_url, owner_id, created_at, visit_count
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.original_url)
        .bind(new_link.owner_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match unique_violation(&e) {
            Some("links_code_key") => code_taken(&new_link.code),
            _ => AppError::from(e),
        })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, original_url, owner_id, created_at, visit_count
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_owner_and_url(
        &self,
        owner_id: UserId,
        original_url: &str,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, original_url, owner_id, created_at, visit_count
            FROM links
            WHERE owner_id = $1 AND original_url = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(owner_id)
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, original_url, owner_id, created_at, visit_count
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn record_visit(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET visit_count = visit_count + 1
            WHERE code = $1
            RETURNING id, code, original_url, owner_id, created_at, visit_count
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
