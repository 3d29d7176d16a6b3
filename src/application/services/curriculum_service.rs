//! Curriculum Service
//!
//! Section lifecycle and ordering for a course. Owns the invariant that
//! the positions of a course's sections are exactly `{0, .., n-1}`:
//! creation appends, deletion closes the gap, and reorders are accepted
//! only as full-snapshot permutations written in one transaction.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::access::owned_course;
use crate::domain::services::ordering;
use crate::domain::{
    Course, CourseRepository, NewSection, OrderingViolation, ReorderEntry, Section,
    SectionRepository,
};
use crate::shared::error::AppError;

/// Curriculum service trait
#[async_trait]
pub trait CurriculumService: Send + Sync {
    /// Sections of a course in display order
    async fn list_sections(
        &self,
        actor_id: &str,
        course_id: Uuid,
    ) -> Result<Vec<Section>, CurriculumError>;

    /// Append a new section at the end of the course
    async fn create_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        request: CreateSectionDto,
    ) -> Result<Section, CurriculumError>;

    /// Get a section of the course
    async fn get_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
    ) -> Result<Section, CurriculumError>;

    /// Update title, description, video and free-access flag
    async fn update_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
        update: UpdateSectionDto,
    ) -> Result<Section, CurriculumError>;

    /// Delete a section, shifting later sections up
    async fn delete_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
    ) -> Result<(), CurriculumError>;

    /// Apply a full-snapshot reorder batch, returning the number of sections written
    async fn reorder_sections(
        &self,
        actor_id: &str,
        course_id: Uuid,
        batch: Vec<ReorderEntry>,
    ) -> Result<usize, CurriculumError>;
}

/// Create section request
#[derive(Debug, Clone)]
pub struct CreateSectionDto {
    pub title: String,
}

/// Update section request
#[derive(Debug, Clone, Default)]
pub struct UpdateSectionDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub is_free: Option<bool>,
}

/// Curriculum service errors
#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    #[error("Course not found")]
    CourseNotFound,

    /// Also raised when a batch names a section of another course
    #[error("Section not found")]
    SectionNotFound,

    #[error("Invalid ordering: {0}")]
    InvalidOrdering(OrderingViolation),

    /// A concurrent append took the trailing position
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store failure; nothing was written
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<OrderingViolation> for CurriculumError {
    fn from(violation: OrderingViolation) -> Self {
        if violation.is_not_found() {
            CurriculumError::SectionNotFound
        } else {
            CurriculumError::InvalidOrdering(violation)
        }
    }
}

impl CurriculumError {
    fn persistence(e: AppError) -> Self {
        CurriculumError::Persistence(e.to_string())
    }
}

/// CurriculumService implementation
pub struct CurriculumServiceImpl<C, S>
where
    C: CourseRepository + ?Sized,
    S: SectionRepository + ?Sized,
{
    course_repo: Arc<C>,
    section_repo: Arc<S>,
}

impl<C, S> CurriculumServiceImpl<C, S>
where
    C: CourseRepository + ?Sized,
    S: SectionRepository + ?Sized,
{
    pub fn new(course_repo: Arc<C>, section_repo: Arc<S>) -> Self {
        Self {
            course_repo,
            section_repo,
        }
    }

    async fn require_course(
        &self,
        actor_id: &str,
        course_id: Uuid,
    ) -> Result<Course, CurriculumError> {
        owned_course(self.course_repo.as_ref(), actor_id, course_id)
            .await
            .map_err(CurriculumError::persistence)?
            .ok_or(CurriculumError::CourseNotFound)
    }

    async fn require_section(
        &self,
        course_id: Uuid,
        section_id: Uuid,
    ) -> Result<Section, CurriculumError> {
        self.section_repo
            .find_by_id(section_id)
            .await
            .map_err(CurriculumError::persistence)?
            .filter(|s| s.belongs_to(course_id))
            .ok_or(CurriculumError::SectionNotFound)
    }
}

#[async_trait]
impl<C, S> CurriculumService for CurriculumServiceImpl<C, S>
where
    C: CourseRepository + ?Sized + 'static,
    S: SectionRepository + ?Sized + 'static,
{
    async fn list_sections(
        &self,
        actor_id: &str,
        course_id: Uuid,
    ) -> Result<Vec<Section>, CurriculumError> {
        self.require_course(actor_id, course_id).await?;

        let sections = self
            .section_repo
            .find_by_course_id(course_id)
            .await
            .map_err(CurriculumError::persistence)?;

        if !ordering::is_dense(sections.iter().map(|s| s.position)) {
            tracing::warn!(%course_id, "Stored section positions are not dense");
        }

        Ok(sections)
    }

    async fn create_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        request: CreateSectionDto,
    ) -> Result<Section, CurriculumError> {
        self.require_course(actor_id, course_id).await?;

        let section = self
            .section_repo
            .append(NewSection {
                id: Uuid::now_v7(),
                course_id,
                title: request.title,
            })
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => CurriculumError::CourseNotFound,
                AppError::Conflict(msg) => CurriculumError::Conflict(msg),
                e => CurriculumError::persistence(e),
            })?;

        tracing::info!(
            %course_id,
            section_id = %section.id,
            position = section.position,
            "Section created"
        );
        Ok(section)
    }

    async fn get_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
    ) -> Result<Section, CurriculumError> {
        self.require_course(actor_id, course_id).await?;
        self.require_section(course_id, section_id).await
    }

    async fn update_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
        update: UpdateSectionDto,
    ) -> Result<Section, CurriculumError> {
        self.require_course(actor_id, course_id).await?;
        let mut section = self.require_section(course_id, section_id).await?;

        if let Some(title) = update.title {
            section.title = title;
        }
        if let Some(description) = update.description {
            section.description = Some(description);
        }
        if let Some(video_url) = update.video_url {
            section.video_url = Some(video_url);
        }
        if let Some(is_free) = update.is_free {
            section.is_free = is_free;
        }

        self.section_repo.update(&section).await.map_err(|e| match e {
            AppError::NotFound(_) => CurriculumError::SectionNotFound,
            e => CurriculumError::persistence(e),
        })
    }

    async fn delete_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
    ) -> Result<(), CurriculumError> {
        self.require_course(actor_id, course_id).await?;
        let section = self.require_section(course_id, section_id).await?;

        self.section_repo.delete(section.id).await.map_err(|e| match e {
            AppError::NotFound(_) => CurriculumError::SectionNotFound,
            e => CurriculumError::persistence(e),
        })?;

        tracing::info!(%course_id, %section_id, position = section.position, "Section deleted");
        Ok(())
    }

    async fn reorder_sections(
        &self,
        actor_id: &str,
        course_id: Uuid,
        batch: Vec<ReorderEntry>,
    ) -> Result<usize, CurriculumError> {
        self.require_course(actor_id, course_id).await?;

        let existing: Vec<Uuid> = self
            .section_repo
            .find_by_course_id(course_id)
            .await
            .map_err(CurriculumError::persistence)?
            .into_iter()
            .map(|s| s.id)
            .collect();

        if let Err(violation) = ordering::validate_batch(&existing, &batch) {
            tracing::info!(%course_id, %violation, "Reorder batch rejected");
            return Err(violation.into());
        }

        let count = batch.len();
        self.section_repo
            .update_positions(course_id, batch.into_iter().map(Into::into).collect())
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => CurriculumError::SectionNotFound,
                e => CurriculumError::persistence(e),
            })?;

        tracing::info!(%course_id, sections = count, "Sections reordered");
        Ok(count)
    }
}
