//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints. Service errors are mapped to
//! [`AppError`](crate::shared::error::AppError) here.

pub mod catalog;
pub mod course;
pub mod health;
pub mod resource;
pub mod section;
