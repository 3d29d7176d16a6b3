//! Reorder batch types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One `(section, position)` pair of a full-snapshot reorder batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub section_id: Uuid,
    pub position: i32,
}

impl ReorderEntry {
    pub fn new(section_id: Uuid, position: i32) -> Self {
        Self {
            section_id,
            position,
        }
    }
}

impl From<ReorderEntry> for (Uuid, i32) {
    fn from(entry: ReorderEntry) -> Self {
        (entry.section_id, entry.position)
    }
}

/// A drag gesture over a rendered list: move the item at `source` to
/// `destination`. `destination` is `None` when the item was dropped
/// outside the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub source: usize,
    pub destination: Option<usize>,
}

impl MoveEvent {
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    pub fn cancelled(source: usize) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

/// Why a reorder batch was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderingViolation {
    /// The section is not part of the course (stale client or tampering).
    #[error("section {0} does not belong to this course")]
    UnknownSection(Uuid),

    /// The batch names a section by something that is not a section ID.
    #[error("section {0:?} does not name a section")]
    UnreadableSection(String),

    #[error("section {0} appears more than once")]
    DuplicateSection(Uuid),

    #[error("position {position} is outside 0..{len}")]
    PositionOutOfRange { position: i64, len: usize },

    #[error("position {0} is assigned more than once")]
    DuplicatePosition(i32),

    /// The batch does not list every section of the course.
    #[error("batch lists {actual} sections but the course has {expected}")]
    IncompleteSnapshot { expected: usize, actual: usize },

    #[error("reorder batch could not be read: {0}")]
    Malformed(String),
}

impl OrderingViolation {
    /// True when the batch references something outside the caller's
    /// scope rather than being structurally malformed.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrderingViolation::UnknownSection(_) | OrderingViolation::UnreadableSection(_)
        )
    }
}
