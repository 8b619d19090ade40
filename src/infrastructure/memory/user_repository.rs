//! In-memory credential store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUser, User, UserId};
use crate::domain::repositories::UserRepository;
use crate::domain::repositories::user_repository::{email_taken, username_taken};
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: UserId,
    users: Vec<User>,
}

/// User repository holding accounts in process memory.
///
/// The username check is exact; the email check ignores case.
#[derive(Default)]
pub struct MemoryUserRepository {
    inner: RwLock<Inner>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.username == new_user.username) {
            return Err(username_taken());
        }
        if inner
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(email_taken());
        }

        inner.next_id += 1;
        let user = User::new(
            inner.next_id,
            new_user.username,
            new_user.email.to_lowercase(),
            new_user.password_hash,
            Utc::now(),
        );
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.users.len() as i64)
    }
}
