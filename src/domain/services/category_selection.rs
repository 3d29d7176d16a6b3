//! Category → subcategory cascade.

use uuid::Uuid;

use crate::domain::entities::{Category, SubCategory};

/// Subcategories selectable under `category_id`; empty for an unknown
/// category.
pub fn subcategory_options(categories: &[Category], category_id: Uuid) -> &[SubCategory] {
    categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.sub_categories.as_slice())
        .unwrap_or(&[])
}

/// Keep `current` only if it is still selectable under `category_id`.
pub fn reconcile_subcategory(
    categories: &[Category],
    category_id: Uuid,
    current: Option<Uuid>,
) -> Option<Uuid> {
    current.filter(|id| {
        subcategory_options(categories, category_id)
            .iter()
            .any(|sub| sub.id == *id)
    })
}
