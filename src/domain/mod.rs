//! # Domain Layer
//!
//! The domain layer contains the core business logic of the authoring service.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (Course, Section, Resource, catalog)
//! - **value_objects**: Immutable value types (reorder batches, move events)
//! - **services**: Pure rules (curriculum ordering, category cascade)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Ordering rules are plain functions, unit-testable without a store

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
