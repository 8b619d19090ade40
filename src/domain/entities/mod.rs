//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account owning short links
//! - [`Link`] - A short code mapped to an original URL
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewUser`, `NewLink`): identifiers and timestamps are assigned by the store.

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, User, UserId};
