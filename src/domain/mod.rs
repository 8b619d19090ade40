//! Domain layer containing business entities and storage contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Repository traits define contracts implemented by the infrastructure layer;
//! business rules live in [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures (`User`, `Link`)
//! - [`repositories`] - Data access trait definitions
//!
//! # Shared State
//!
//! The store is the only shared mutable state. Implementations are responsible
//! for enforcing uniqueness (usernames, emails, short codes) and for applying
//! visit counter increments atomically.

pub mod entities;
pub mod repositories;
