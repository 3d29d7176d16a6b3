//! Curriculum ordering rules.
//!
//! Sections of a course carry a dense zero-based `position`. A client
//! reorders by computing the whole new list locally and submitting every
//! `(section, index)` pair; the server only has to check that the batch
//! is a permutation of the course's current sections.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::value_objects::{MoveEvent, OrderingViolation, ReorderEntry};

/// Check a full-snapshot batch against the course's current sections.
///
/// Foreign sections are reported before structural problems so that a
/// stale or tampered batch always surfaces as not-found.
pub fn validate_batch(
    existing_section_ids: &[Uuid],
    batch: &[ReorderEntry],
) -> Result<(), OrderingViolation> {
    let existing: HashSet<Uuid> = existing_section_ids.iter().copied().collect();

    if let Some(entry) = batch.iter().find(|e| !existing.contains(&e.section_id)) {
        return Err(OrderingViolation::UnknownSection(entry.section_id));
    }

    let mut seen_sections = HashSet::with_capacity(batch.len());
    let mut seen_positions = HashSet::with_capacity(batch.len());
    for entry in batch {
        if !seen_sections.insert(entry.section_id) {
            return Err(OrderingViolation::DuplicateSection(entry.section_id));
        }
        if entry.position < 0 || entry.position as usize >= batch.len() {
            return Err(OrderingViolation::PositionOutOfRange {
                position: i64::from(entry.position),
                len: batch.len(),
            });
        }
        if !seen_positions.insert(entry.position) {
            return Err(OrderingViolation::DuplicatePosition(entry.position));
        }
    }

    // n distinct positions in 0..n are exactly {0, .., n-1}; the batch
    // must also cover the whole course to keep that true for storage.
    if batch.len() != existing.len() {
        return Err(OrderingViolation::IncompleteSnapshot {
            expected: existing.len(),
            actual: batch.len(),
        });
    }

    Ok(())
}

/// Apply a drag gesture to a list, returning the new list.
///
/// A cancelled gesture or an out-of-range source leaves the list as is;
/// a destination past the end moves the item to the end.
pub fn compute_reorder<T: Clone>(items: &[T], event: MoveEvent) -> Vec<T> {
    let mut updated = items.to_vec();
    let Some(destination) = event.destination else {
        return updated;
    };
    if event.source >= updated.len() {
        return updated;
    }

    let moved = updated.remove(event.source);
    let destination = destination.min(updated.len());
    updated.insert(destination, moved);
    updated
}

/// Number every item by its index, producing the batch to submit.
pub fn snapshot_batch<I>(ordered_ids: I) -> Vec<ReorderEntry>
where
    I: IntoIterator<Item = Uuid>,
{
    ordered_ids
        .into_iter()
        .enumerate()
        .map(|(index, id)| ReorderEntry::new(id, index as i32))
        .collect()
}

/// Whether the positions are exactly `{0, .., n-1}`.
pub fn is_dense<I>(positions: I) -> bool
where
    I: IntoIterator<Item = i32>,
{
    let mut sorted: Vec<i32> = positions.into_iter().collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(index, position)| *position == index as i32)
}
