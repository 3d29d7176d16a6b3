//! Resource Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::CreateResourceRequest;
use crate::application::dto::response::ResourceResponse;
use crate::application::services::{ResourceError, ResourceService};
use crate::presentation::http::AppJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id, validation_error};
use crate::startup::AppState;

impl From<ResourceError> for AppError {
    fn from(e: ResourceError) -> Self {
        match e {
            ResourceError::CourseNotFound => AppError::NotFound("Course not found".into()),
            ResourceError::SectionNotFound => AppError::NotFound("Section not found".into()),
            ResourceError::NotFound => AppError::NotFound("Resource not found".into()),
            ResourceError::Persistence(msg) => AppError::Persistence(msg),
        }
    }
}

/// Attach a file to a section
pub async fn create_resource(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((course_id, section_id)): Path<(String, String)>,
    AppJson(body): AppJson<CreateResourceRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), AppError> {
    let course_id = parse_id(&course_id, "course")?;
    let section_id = parse_id(&section_id, "section")?;
    body.validate().map_err(validation_error)?;

    let resource = state
        .resource_service()
        .add_resource(&auth.instructor_id, course_id, section_id, body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ResourceResponse::from(resource))))
}

pub async fn list_resources(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((course_id, section_id)): Path<(String, String)>,
) -> Result<Json<Vec<ResourceResponse>>, AppError> {
    let course_id = parse_id(&course_id, "course")?;
    let section_id = parse_id(&section_id, "section")?;

    let resources = state
        .resource_service()
        .list_resources(&auth.instructor_id, course_id, section_id)
        .await?;

    Ok(Json(resources.into_iter().map(ResourceResponse::from).collect()))
}

pub async fn delete_resource(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((course_id, section_id, resource_id)): Path<(String, String, String)>,
) -> Result<StatusCode, AppError> {
    let course_id = parse_id(&course_id, "course")?;
    let section_id = parse_id(&section_id, "section")?;
    let resource_id = parse_id(&resource_id, "resource")?;

    state
        .resource_service()
        .delete_resource(&auth.instructor_id, course_id, section_id, resource_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
