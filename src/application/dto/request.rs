//! Request DTOs
//!
//! Data structures for API request bodies. Field names are camelCase on
//! the wire.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{
    CreateCourseDto, CreateResourceDto, CreateSectionDto, UpdateCourseDto, UpdateSectionDto,
};
use crate::domain::{OrderingViolation, ReorderEntry};

// =============================================================================
// Courses
// =============================================================================

/// Create course request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be 2-200 characters"))]
    pub title: String,

    pub category_id: Uuid,
    pub sub_category_id: Uuid,
}

impl From<CreateCourseRequest> for CreateCourseDto {
    fn from(req: CreateCourseRequest) -> Self {
        Self {
            title: req.title,
            category_id: req.category_id,
            sub_category_id: req.sub_category_id,
        }
    }
}

/// Update course request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be 2-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "Subtitle must be at most 200 characters"))]
    pub subtitle: Option<String>,

    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub level_id: Option<Uuid>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
}

impl From<UpdateCourseRequest> for UpdateCourseDto {
    fn from(req: UpdateCourseRequest) -> Self {
        Self {
            title: req.title,
            subtitle: req.subtitle,
            description: req.description,
            image_url: req.image_url,
            category_id: req.category_id,
            sub_category_id: req.sub_category_id,
            level_id: req.level_id,
            price: req.price,
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Create section request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSectionRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be 2-200 characters"))]
    pub title: String,
}

impl From<CreateSectionRequest> for CreateSectionDto {
    fn from(req: CreateSectionRequest) -> Self {
        Self { title: req.title }
    }
}

/// Update section request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be 2-200 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub video_url: Option<String>,
    pub is_free: Option<bool>,
}

impl From<UpdateSectionRequest> for UpdateSectionDto {
    fn from(req: UpdateSectionRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            video_url: req.video_url,
            is_free: req.is_free,
        }
    }
}

/// One `(section, new position)` pair of a reorder batch.
///
/// Kept loosely typed on the wire so that a bad ID or an oversized
/// position is reported as an ordering problem, not a decoding one.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderItem {
    pub id: String,
    pub position: i64,
}

/// Reorder request: the full new order of a course's sections
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub list: Vec<ReorderItem>,
}

impl ReorderRequest {
    /// Convert into a domain batch. Unreadable IDs are reported before
    /// positions that do not fit a section position.
    pub fn into_batch(self) -> Result<Vec<ReorderEntry>, OrderingViolation> {
        let len = self.list.len();
        let ids = self
            .list
            .iter()
            .map(|item| {
                Uuid::parse_str(&item.id)
                    .map_err(|_| OrderingViolation::UnreadableSection(item.id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        ids.into_iter()
            .zip(self.list)
            .map(|(id, item)| {
                let position = i32::try_from(item.position).map_err(|_| {
                    OrderingViolation::PositionOutOfRange {
                        position: item.position,
                        len,
                    }
                })?;
                Ok(ReorderEntry::new(id, position))
            })
            .collect()
    }
}

// =============================================================================
// Resources
// =============================================================================

/// Attach resource request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    #[validate(length(min = 2, max = 200, message = "Name must be 2-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "File URL is required"))]
    pub file_url: String,
}

impl From<CreateResourceRequest> for CreateResourceDto {
    fn from(req: CreateResourceRequest) -> Self {
        Self {
            name: req.name,
            file_url: req.file_url,
        }
    }
}
