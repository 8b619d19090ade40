//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries are
//! checked at runtime and decoded into `FromRow` row structs, so building the
//! crate does not require a live database.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Credential store
//! - [`PgLinkRepository`] - Link storage, listing and visit counting

pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
