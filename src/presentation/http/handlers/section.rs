//! Section Handlers
//!
//! Curriculum lifecycle and the reorder endpoint.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateSectionRequest, ReorderRequest, UpdateSectionRequest};
use crate::application::dto::response::{ReorderResponse, SectionDetailResponse, SectionResponse};
use crate::application::services::{CurriculumError, CurriculumService, ResourceService};
use crate::domain::OrderingViolation;
use crate::infrastructure::metrics;
use crate::presentation::http::AppJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id, validation_error};
use crate::startup::AppState;

impl From<CurriculumError> for AppError {
    fn from(e: CurriculumError) -> Self {
        match e {
            CurriculumError::CourseNotFound => AppError::NotFound("Course not found".into()),
            CurriculumError::SectionNotFound => AppError::NotFound("Section not found".into()),
            CurriculumError::InvalidOrdering(violation) => {
                AppError::InvalidOrdering(violation.to_string())
            }
            CurriculumError::Conflict(msg) => AppError::Conflict(msg),
            CurriculumError::Persistence(msg) => AppError::Persistence(msg),
        }
    }
}

/// Metrics label for a reorder outcome
fn reorder_outcome(result: &Result<usize, CurriculumError>) -> &'static str {
    match result {
        Ok(_) => "accepted",
        Err(CurriculumError::CourseNotFound | CurriculumError::SectionNotFound) => "not_found",
        Err(CurriculumError::InvalidOrdering(_)) => "invalid_ordering",
        Err(CurriculumError::Conflict(_) | CurriculumError::Persistence(_)) => "persistence_error",
    }
}

/// List sections in display order
pub async fn list_sections(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<SectionResponse>>, AppError> {
    let course_id = parse_id(&course_id, "course")?;

    let sections = state
        .curriculum_service()
        .list_sections(&auth.instructor_id, course_id)
        .await?;

    Ok(Json(sections.into_iter().map(SectionResponse::from).collect()))
}

/// Append a section to the end of the course
pub async fn create_section(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(course_id): Path<String>,
    AppJson(body): AppJson<CreateSectionRequest>,
) -> Result<(StatusCode, Json<SectionResponse>), AppError> {
    let course_id = parse_id(&course_id, "course")?;
    body.validate().map_err(validation_error)?;

    let section = state
        .curriculum_service()
        .create_section(&auth.instructor_id, course_id, body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(SectionResponse::from(section))))
}

/// Get a section with its resources
pub async fn get_section(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((course_id, section_id)): Path<(String, String)>,
) -> Result<Json<SectionDetailResponse>, AppError> {
    let course_id = parse_id(&course_id, "course")?;
    let section_id = parse_id(&section_id, "section")?;

    let section = state
        .curriculum_service()
        .get_section(&auth.instructor_id, course_id, section_id)
        .await?;
    let resources = state
        .resource_service()
        .list_resources(&auth.instructor_id, course_id, section_id)
        .await?;

    Ok(Json(SectionDetailResponse::new(section, resources)))
}

/// Update section content. Position is not editable here.
pub async fn update_section(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((course_id, section_id)): Path<(String, String)>,
    AppJson(body): AppJson<UpdateSectionRequest>,
) -> Result<Json<SectionResponse>, AppError> {
    let course_id = parse_id(&course_id, "course")?;
    let section_id = parse_id(&section_id, "section")?;
    body.validate().map_err(validation_error)?;

    let section = state
        .curriculum_service()
        .update_section(&auth.instructor_id, course_id, section_id, body.into())
        .await?;

    Ok(Json(SectionResponse::from(section)))
}

pub async fn delete_section(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((course_id, section_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let course_id = parse_id(&course_id, "course")?;
    let section_id = parse_id(&section_id, "section")?;

    state
        .curriculum_service()
        .delete_section(&auth.instructor_id, course_id, section_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Apply a full-snapshot reorder. All positions are written or none are.
///
/// A body that cannot be read as a batch is itself an invalid ordering.
pub async fn reorder_sections(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(course_id): Path<String>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<ReorderResponse>, AppError> {
    let course_id = parse_id(&course_id, "course")?;

    let batch = payload
        .map_err(|rejection| OrderingViolation::Malformed(rejection.body_text()))
        .and_then(|Json(body)| body.into_batch())
        .map_err(CurriculumError::from);
    let result = match batch {
        Ok(batch) => {
            state
                .curriculum_service()
                .reorder_sections(&auth.instructor_id, course_id, batch)
                .await
        }
        Err(e) => Err(e),
    };
    metrics::record_reorder(reorder_outcome(&result));

    Ok(Json(ReorderResponse { reordered: result? }))
}
