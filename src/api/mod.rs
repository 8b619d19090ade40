//! HTTP surface of the service.
//!
//! Handlers stay thin: they extract and validate input, call into
//! [`crate::application::services`], and map results onto status codes and
//! the JSON shapes in [`dto`]. Session checks live in [`middleware::auth`].

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
