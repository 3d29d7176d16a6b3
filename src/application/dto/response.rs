//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::CourseDetail;
use crate::domain::services::{course_completeness, section_completeness, Completeness};
use crate::domain::{Category, Course, Level, Resource, Section, SubCategory};

/// Publishing readiness of an authoring form
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessResponse {
    /// Number of required fields
    pub required_fields: usize,
    pub missing_fields: Vec<String>,
    pub is_complete: bool,
}

impl From<Completeness> for CompletenessResponse {
    fn from(completeness: Completeness) -> Self {
        Self {
            required_fields: completeness.required.len(),
            is_complete: completeness.is_complete(),
            missing_fields: completeness.missing.into_iter().map(String::from).collect(),
        }
    }
}

// =============================================================================
// Course Responses
// =============================================================================

/// Course metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category_id: String,
    pub sub_category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title,
            subtitle: course.subtitle,
            description: course.description,
            image_url: course.image_url,
            category_id: course.category_id.to_string(),
            sub_category_id: course.sub_category_id.to_string(),
            level_id: course.level_id.map(|id| id.to_string()),
            price: course.price,
            created_at: course.created_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
        }
    }
}

/// Course with its curriculum in display order
#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub sections: Vec<SectionResponse>,
    #[serde(flatten)]
    pub completeness: CompletenessResponse,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(detail: CourseDetail) -> Self {
        Self {
            completeness: course_completeness(&detail.course, detail.sections.len()).into(),
            course: detail.course.into(),
            sections: detail.sections.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Section Responses
// =============================================================================

/// Section response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Zero-based rank within the course
    pub position: i32,
    pub is_free: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Section> for SectionResponse {
    fn from(section: Section) -> Self {
        Self {
            id: section.id.to_string(),
            course_id: section.course_id.to_string(),
            title: section.title,
            description: section.description,
            video_url: section.video_url,
            position: section.position,
            is_free: section.is_free,
            created_at: section.created_at.to_rfc3339(),
            updated_at: section.updated_at.to_rfc3339(),
        }
    }
}

/// Section with its attached resources
#[derive(Debug, Serialize)]
pub struct SectionDetailResponse {
    #[serde(flatten)]
    pub section: SectionResponse,
    pub resources: Vec<ResourceResponse>,
    #[serde(flatten)]
    pub completeness: CompletenessResponse,
}

impl SectionDetailResponse {
    pub fn new(section: Section, resources: Vec<Resource>) -> Self {
        Self {
            completeness: section_completeness(&section).into(),
            section: section.into(),
            resources: resources.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of a reorder submission
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    /// Number of sections written
    pub reordered: usize,
}

// =============================================================================
// Resource Responses
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: String,
    pub section_id: String,
    pub name: String,
    pub file_url: String,
    pub created_at: String,
}

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id.to_string(),
            section_id: resource.section_id.to_string(),
            name: resource.name,
            file_url: resource.file_url,
            created_at: resource.created_at.to_rfc3339(),
        }
    }
}

// =============================================================================
// Catalog Responses
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryResponse {
    pub id: String,
    pub category_id: String,
    pub name: String,
}

impl From<SubCategory> for SubCategoryResponse {
    fn from(sub: SubCategory) -> Self {
        Self {
            id: sub.id.to_string(),
            category_id: sub.category_id.to_string(),
            name: sub.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub sub_categories: Vec<SubCategoryResponse>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            sub_categories: category.sub_categories.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LevelResponse {
    pub id: String,
    pub name: String,
}

impl From<Level> for LevelResponse {
    fn from(level: Level) -> Self {
        Self {
            id: level.id.to_string(),
            name: level.name,
        }
    }
}
