//! Domain Services
//!
//! Pure business rules that don't belong to a single entity.

pub mod category_selection;
pub mod completeness;
pub mod ordering;

pub use category_selection::{reconcile_subcategory, subcategory_options};
pub use completeness::{course_completeness, section_completeness, Completeness};
pub use ordering::{compute_reorder, is_dense, snapshot_batch, validate_batch};
