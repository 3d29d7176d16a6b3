//! Course Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateCourseRequest, UpdateCourseRequest};
use crate::application::dto::response::{CourseDetailResponse, CourseResponse};
use crate::application::services::{CourseError, CourseService};
use crate::presentation::http::AppJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id, validation_error};
use crate::startup::AppState;

impl From<CourseError> for AppError {
    fn from(e: CourseError) -> Self {
        match e {
            CourseError::NotFound => AppError::NotFound("Course not found".into()),
            CourseError::Validation(msg) => AppError::Validation(msg),
            CourseError::Persistence(msg) => AppError::Persistence(msg),
        }
    }
}

/// Create a course owned by the caller
pub async fn create_course(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppJson(body): AppJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let course = state
        .course_service()
        .create_course(&auth.instructor_id, body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// List the caller's courses, newest first
pub async fn list_courses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let courses = state
        .course_service()
        .list_courses(&auth.instructor_id)
        .await?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Get a course with its sections in display order
pub async fn get_course(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course_id = parse_id(&course_id, "course")?;

    let detail = state
        .course_service()
        .get_course(&auth.instructor_id, course_id)
        .await?;

    Ok(Json(CourseDetailResponse::from(detail)))
}

/// Update course metadata
pub async fn update_course(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(course_id): Path<String>,
    AppJson(body): AppJson<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    let course_id = parse_id(&course_id, "course")?;
    body.validate().map_err(validation_error)?;

    let course = state
        .course_service()
        .update_course(&auth.instructor_id, course_id, body.into())
        .await?;

    Ok(Json(CourseResponse::from(course)))
}

/// Delete a course with its curriculum
pub async fn delete_course(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(course_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let course_id = parse_id(&course_id, "course")?;

    state
        .course_service()
        .delete_course(&auth.instructor_id, course_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
