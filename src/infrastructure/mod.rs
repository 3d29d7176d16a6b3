//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database pool, migrations and health probing (PostgreSQL)
//! - Repository implementations
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
