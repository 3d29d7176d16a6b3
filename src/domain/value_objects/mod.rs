//! Value Objects
//!
//! Immutable value types shared by the ordering logic and its callers.

mod reorder;

pub use reorder::{MoveEvent, OrderingViolation, ReorderEntry};
