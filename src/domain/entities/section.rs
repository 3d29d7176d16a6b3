//! Section entity and repository trait.
//!
//! Maps to the `sections` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// An ordered unit of curriculum within a course.
///
/// Maps to the `sections` table:
/// - id: UUID PRIMARY KEY
/// - course_id: UUID NOT NULL REFERENCES courses(id) ON DELETE CASCADE
/// - title: VARCHAR(200) NOT NULL
/// - description: TEXT NULL
/// - video_url: TEXT NULL
/// - position: INTEGER NOT NULL, UNIQUE (course_id, position) DEFERRABLE
/// - is_free: BOOLEAN NOT NULL DEFAULT FALSE
/// - created_at / updated_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,

    /// Owning course
    pub course_id: Uuid,

    /// Section title (at least 2 characters)
    pub title: String,

    /// Rich-text body produced by the editor
    pub description: Option<String>,

    /// Reference to the hosted video, if one was uploaded
    pub video_url: Option<String>,

    /// Zero-based dense rank within the course
    pub position: i32,

    /// Whether the section can be previewed without purchase
    pub is_free: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a section about to be appended to a course.
///
/// The store assigns the position so the append is race-free.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSection {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
}

impl Section {
    /// Check if this section belongs to the given course.
    pub fn belongs_to(&self, course_id: Uuid) -> bool {
        self.course_id == course_id
    }
}

/// Repository trait for Section data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Find a section by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Section>, AppError>;

    /// All sections of a course, ordered by position.
    async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<Section>, AppError>;

    /// Insert a section at the trailing position of its course.
    async fn append(&self, section: NewSection) -> Result<Section, AppError>;

    /// Update editable fields. Never touches `position`.
    async fn update(&self, section: &Section) -> Result<Section, AppError>;

    /// Delete a section and shift later sections down by one, atomically.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Write a batch of `(section_id, position)` pairs in one transaction.
    ///
    /// Fails with `AppError::NotFound` (and writes nothing) if any ID is
    /// not a section of `course_id`.
    async fn update_positions(
        &self,
        course_id: Uuid,
        positions: Vec<(Uuid, i32)>,
    ) -> Result<(), AppError>;
}
