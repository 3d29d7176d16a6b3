//! Course Service
//!
//! Course metadata management for the owning instructor.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::access::owned_course;
use crate::domain::services::category_selection::{reconcile_subcategory, subcategory_options};
use crate::domain::{
    Category, CategoryRepository, Course, CourseRepository, Section, SectionRepository,
};
use crate::shared::error::AppError;

/// Course service trait
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Create a course owned by the actor
    async fn create_course(
        &self,
        actor_id: &str,
        request: CreateCourseDto,
    ) -> Result<Course, CourseError>;

    /// Courses owned by the actor, newest first
    async fn list_courses(&self, actor_id: &str) -> Result<Vec<Course>, CourseError>;

    /// Course with its sections in display order
    async fn get_course(
        &self,
        actor_id: &str,
        course_id: Uuid,
    ) -> Result<CourseDetail, CourseError>;

    /// Update course metadata
    async fn update_course(
        &self,
        actor_id: &str,
        course_id: Uuid,
        update: UpdateCourseDto,
    ) -> Result<Course, CourseError>;

    /// Delete a course with its sections and resources
    async fn delete_course(&self, actor_id: &str, course_id: Uuid) -> Result<(), CourseError>;
}

/// Create course request
#[derive(Debug, Clone)]
pub struct CreateCourseDto {
    pub title: String,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
}

/// Update course request
#[derive(Debug, Clone, Default)]
pub struct UpdateCourseDto {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub level_id: Option<Uuid>,
    pub price: Option<f64>,
}

/// A course together with its ordered curriculum
#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub course: Course,
    pub sections: Vec<Section>,
}

/// Course service errors
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error("Course not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<AppError> for CourseError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::NotFound(_) => CourseError::NotFound,
            AppError::Validation(msg) => CourseError::Validation(msg),
            e => CourseError::Persistence(e.to_string()),
        }
    }
}

/// CourseService implementation
pub struct CourseServiceImpl<C, S, K>
where
    C: CourseRepository + ?Sized,
    S: SectionRepository + ?Sized,
    K: CategoryRepository + ?Sized,
{
    course_repo: Arc<C>,
    section_repo: Arc<S>,
    catalog_repo: Arc<K>,
}

impl<C, S, K> CourseServiceImpl<C, S, K>
where
    C: CourseRepository + ?Sized,
    S: SectionRepository + ?Sized,
    K: CategoryRepository + ?Sized,
{
    pub fn new(course_repo: Arc<C>, section_repo: Arc<S>, catalog_repo: Arc<K>) -> Self {
        Self {
            course_repo,
            section_repo,
            catalog_repo,
        }
    }

    async fn require_course(&self, actor_id: &str, course_id: Uuid) -> Result<Course, CourseError> {
        owned_course(self.course_repo.as_ref(), actor_id, course_id)
            .await?
            .ok_or(CourseError::NotFound)
    }

    /// Resolve the subcategory a course ends up with under `category_id`.
    ///
    /// An explicitly requested subcategory must be selectable under the
    /// category; otherwise the current one is kept only if still valid.
    fn resolve_subcategory(
        catalog: &[Category],
        category_id: Uuid,
        requested: Option<Uuid>,
        current: Option<Uuid>,
    ) -> Result<Uuid, CourseError> {
        if !catalog.iter().any(|c| c.id == category_id) {
            return Err(CourseError::Validation("Unknown category".into()));
        }

        match requested {
            Some(sub) => reconcile_subcategory(catalog, category_id, Some(sub)).ok_or_else(|| {
                CourseError::Validation(
                    "Subcategory does not belong to the selected category".into(),
                )
            }),
            None => reconcile_subcategory(catalog, category_id, current).ok_or_else(|| {
                let options = subcategory_options(catalog, category_id).len();
                CourseError::Validation(format!(
                    "Subcategory is required for the selected category ({} options)",
                    options
                ))
            }),
        }
    }
}

#[async_trait]
impl<C, S, K> CourseService for CourseServiceImpl<C, S, K>
where
    C: CourseRepository + ?Sized + 'static,
    S: SectionRepository + ?Sized + 'static,
    K: CategoryRepository + ?Sized + 'static,
{
    async fn create_course(
        &self,
        actor_id: &str,
        request: CreateCourseDto,
    ) -> Result<Course, CourseError> {
        let catalog = self.catalog_repo.list_categories().await?;
        let sub_category_id = Self::resolve_subcategory(
            &catalog,
            request.category_id,
            Some(request.sub_category_id),
            None,
        )?;

        let now = Utc::now();
        let course = Course {
            id: Uuid::now_v7(),
            instructor_id: actor_id.to_string(),
            title: request.title,
            subtitle: None,
            description: None,
            image_url: None,
            category_id: request.category_id,
            sub_category_id,
            level_id: None,
            price: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.course_repo.create(&course).await?;
        tracing::info!(course_id = %created.id, instructor_id = %actor_id, "Course created");
        Ok(created)
    }

    async fn list_courses(&self, actor_id: &str) -> Result<Vec<Course>, CourseError> {
        Ok(self.course_repo.find_by_instructor(actor_id).await?)
    }

    async fn get_course(
        &self,
        actor_id: &str,
        course_id: Uuid,
    ) -> Result<CourseDetail, CourseError> {
        let course = self.require_course(actor_id, course_id).await?;
        let sections = self.section_repo.find_by_course_id(course_id).await?;
        Ok(CourseDetail { course, sections })
    }

    async fn update_course(
        &self,
        actor_id: &str,
        course_id: Uuid,
        update: UpdateCourseDto,
    ) -> Result<Course, CourseError> {
        let mut course = self.require_course(actor_id, course_id).await?;

        if update.category_id.is_some() || update.sub_category_id.is_some() {
            let catalog = self.catalog_repo.list_categories().await?;
            let category_id = update.category_id.unwrap_or(course.category_id);
            course.sub_category_id = Self::resolve_subcategory(
                &catalog,
                category_id,
                update.sub_category_id,
                Some(course.sub_category_id),
            )?;
            course.category_id = category_id;
        }

        if let Some(level_id) = update.level_id {
            let levels = self.catalog_repo.list_levels().await?;
            if !levels.iter().any(|l| l.id == level_id) {
                return Err(CourseError::Validation("Unknown level".into()));
            }
            course.level_id = Some(level_id);
        }

        if let Some(title) = update.title {
            course.title = title;
        }
        if let Some(subtitle) = update.subtitle {
            course.subtitle = Some(subtitle);
        }
        if let Some(description) = update.description {
            course.description = Some(description);
        }
        if let Some(image_url) = update.image_url {
            course.image_url = Some(image_url);
        }
        if let Some(price) = update.price {
            if price < 0.0 {
                return Err(CourseError::Validation("Price cannot be negative".into()));
            }
            course.price = Some(price);
        }

        Ok(self.course_repo.update(&course).await?)
    }

    async fn delete_course(&self, actor_id: &str, course_id: Uuid) -> Result<(), CourseError> {
        self.require_course(actor_id, course_id).await?;
        self.course_repo.delete(course_id).await?;
        tracing::info!(%course_id, "Course deleted");
        Ok(())
    }
}
