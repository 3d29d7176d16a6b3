//! Course entity and repository trait.
//!
//! Maps to the `courses` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Top-level sellable unit. Aggregate root for sections and resources.
///
/// Maps to the `courses` table:
/// - id: UUID PRIMARY KEY
/// - instructor_id: TEXT NOT NULL -- subject from the auth provider
/// - title: VARCHAR(200) NOT NULL
/// - subtitle, description, image_url: TEXT NULL
/// - category_id: UUID NOT NULL REFERENCES categories(id)
/// - sub_category_id: UUID NOT NULL REFERENCES sub_categories(id)
/// - level_id: UUID NULL REFERENCES levels(id)
/// - price: DOUBLE PRECISION NULL
/// - created_at / updated_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,

    /// Identity of the owning instructor
    pub instructor_id: String,

    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,

    /// Cover image reference produced by the upload widget
    pub image_url: Option<String>,

    pub category_id: Uuid,

    /// Always one of the subcategories of `category_id`
    pub sub_category_id: Uuid,

    pub level_id: Option<Uuid>,
    pub price: Option<f64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Check if the given instructor owns this course.
    pub fn is_owned_by(&self, instructor_id: &str) -> bool {
        self.instructor_id == instructor_id
    }
}

/// Repository trait for Course data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find a course by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, AppError>;

    /// Courses of an instructor, newest first.
    async fn find_by_instructor(&self, instructor_id: &str) -> Result<Vec<Course>, AppError>;

    /// Create a new course.
    async fn create(&self, course: &Course) -> Result<Course, AppError>;

    /// Update an existing course.
    async fn update(&self, course: &Course) -> Result<Course, AppError>;

    /// Delete a course together with its sections and resources.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
