//! Resource Service
//!
//! File attachments of a section. Resources are unordered and listed in
//! insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::access::owned_course;
use crate::domain::{CourseRepository, Resource, ResourceRepository, SectionRepository};
use crate::shared::error::AppError;

/// Resource service trait
#[async_trait]
pub trait ResourceService: Send + Sync {
    async fn add_resource(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
        request: CreateResourceDto,
    ) -> Result<Resource, ResourceError>;

    async fn list_resources(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
    ) -> Result<Vec<Resource>, ResourceError>;

    async fn delete_resource(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
        resource_id: Uuid,
    ) -> Result<(), ResourceError>;
}

/// Create resource request
#[derive(Debug, Clone)]
pub struct CreateResourceDto {
    pub name: String,
    pub file_url: String,
}

/// Resource service errors
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Course not found")]
    CourseNotFound,

    #[error("Section not found")]
    SectionNotFound,

    #[error("Resource not found")]
    NotFound,

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<AppError> for ResourceError {
    fn from(e: AppError) -> Self {
        ResourceError::Persistence(e.to_string())
    }
}

/// ResourceService implementation
pub struct ResourceServiceImpl<C, S, R>
where
    C: CourseRepository + ?Sized,
    S: SectionRepository + ?Sized,
    R: ResourceRepository + ?Sized,
{
    course_repo: Arc<C>,
    section_repo: Arc<S>,
    resource_repo: Arc<R>,
}

impl<C, S, R> ResourceServiceImpl<C, S, R>
where
    C: CourseRepository + ?Sized,
    S: SectionRepository + ?Sized,
    R: ResourceRepository + ?Sized,
{
    pub fn new(course_repo: Arc<C>, section_repo: Arc<S>, resource_repo: Arc<R>) -> Self {
        Self {
            course_repo,
            section_repo,
            resource_repo,
        }
    }

    /// Resolve the course and section, both must be reachable by the actor.
    async fn require_section(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
    ) -> Result<(), ResourceError> {
        owned_course(self.course_repo.as_ref(), actor_id, course_id)
            .await?
            .ok_or(ResourceError::CourseNotFound)?;

        self.section_repo
            .find_by_id(section_id)
            .await?
            .filter(|s| s.belongs_to(course_id))
            .ok_or(ResourceError::SectionNotFound)?;

        Ok(())
    }
}

#[async_trait]
impl<C, S, R> ResourceService for ResourceServiceImpl<C, S, R>
where
    C: CourseRepository + ?Sized + 'static,
    S: SectionRepository + ?Sized + 'static,
    R: ResourceRepository + ?Sized + 'static,
{
    async fn add_resource(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
        request: CreateResourceDto,
    ) -> Result<Resource, ResourceError> {
        self.require_section(actor_id, course_id, section_id).await?;

        let resource = Resource {
            id: Uuid::now_v7(),
            section_id,
            name: request.name,
            file_url: request.file_url,
            created_at: Utc::now(),
        };

        let created = self.resource_repo.create(&resource).await?;
        tracing::debug!(resource_id = %created.id, %section_id, "Resource attached");
        Ok(created)
    }

    async fn list_resources(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
    ) -> Result<Vec<Resource>, ResourceError> {
        self.require_section(actor_id, course_id, section_id).await?;
        Ok(self.resource_repo.find_by_section_id(section_id).await?)
    }

    async fn delete_resource(
        &self,
        actor_id: &str,
        course_id: Uuid,
        section_id: Uuid,
        resource_id: Uuid,
    ) -> Result<(), ResourceError> {
        self.require_section(actor_id, course_id, section_id).await?;

        self.resource_repo
            .find_by_id(resource_id)
            .await?
            .filter(|r| r.section_id == section_id)
            .ok_or(ResourceError::NotFound)?;

        self.resource_repo.delete(resource_id).await?;
        Ok(())
    }
}
