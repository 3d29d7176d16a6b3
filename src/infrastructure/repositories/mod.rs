//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **CourseRepository** - Course metadata owned by instructors
//! - **SectionRepository** - Ordered curriculum sections, transactional reindexing
//! - **ResourceRepository** - File attachments of sections
//! - **CategoryRepository** - Read-only catalog (categories, subcategories, levels)
//!
//! Handlers reach repositories through [`Repositories`], a bundle of trait
//! objects, so the same router runs against PostgreSQL or test doubles.

pub mod category_repository;
pub mod course_repository;
pub mod resource_repository;
pub mod section_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{CategoryRepository, CourseRepository, ResourceRepository, SectionRepository};
use crate::infrastructure::database::{HealthProbe, PgHealthProbe};

pub use category_repository::PgCategoryRepository;
pub use course_repository::PgCourseRepository;
pub use resource_repository::PgResourceRepository;
pub use section_repository::PgSectionRepository;

/// Data access handles shared by all request handlers.
#[derive(Clone)]
pub struct Repositories {
    pub courses: Arc<dyn CourseRepository>,
    pub sections: Arc<dyn SectionRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub catalog: Arc<dyn CategoryRepository>,
    pub health: Arc<dyn HealthProbe>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            courses: Arc::new(PgCourseRepository::new(pool.clone())),
            sections: Arc::new(PgSectionRepository::new(pool.clone())),
            resources: Arc::new(PgResourceRepository::new(pool.clone())),
            catalog: Arc::new(PgCategoryRepository::new(pool.clone())),
            health: Arc::new(PgHealthProbe::new(pool)),
        }
    }
}
