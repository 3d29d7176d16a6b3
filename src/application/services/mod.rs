//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **CourseService**: Course metadata, catalog-validated
//! - **CurriculumService**: Section lifecycle and ordering
//! - **ResourceService**: Section file attachments
//! - **CatalogService**: Categories, subcategories and levels

pub mod access;
pub mod catalog_service;
pub mod course_service;
pub mod curriculum_service;
pub mod resource_service;

pub use catalog_service::{CatalogError, CatalogService, CatalogServiceImpl};
pub use course_service::{
    CourseDetail, CourseError, CourseService, CourseServiceImpl, CreateCourseDto, UpdateCourseDto,
};
pub use curriculum_service::{
    CreateSectionDto, CurriculumError, CurriculumService, CurriculumServiceImpl, UpdateSectionDto,
};
pub use resource_service::{CreateResourceDto, ResourceError, ResourceService, ResourceServiceImpl};
