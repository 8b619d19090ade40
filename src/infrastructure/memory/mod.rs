//! In-process repository implementations.
//!
//! Backed by `tokio::sync::RwLock`-guarded collections. Used when
//! `STORAGE_BACKEND=memory` and by the HTTP-level tests; data is lost on restart.

pub mod link_repository;
pub mod user_repository;

pub use link_repository::MemoryLinkRepository;
pub use user_repository::MemoryUserRepository;
