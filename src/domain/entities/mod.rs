//! # Domain Entities
//!
//! Core domain entities of the course authoring service.
//! All entities map directly to their corresponding database tables.
//!
//! - **Course**: aggregate root owned by one instructor
//! - **Section**: an ordered unit of curriculum within a course
//! - **Resource**: an unordered file attachment of a section
//! - **Category / SubCategory / Level**: read-only catalog
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod category;
mod course;
mod resource;
mod section;

pub use category::{Category, CategoryRepository, Level, SubCategory};
pub use course::{Course, CourseRepository};
pub use resource::{Resource, ResourceRepository};
pub use section::{NewSection, Section, SectionRepository};

#[cfg(test)]
pub use category::MockCategoryRepository;
#[cfg(test)]
pub use course::MockCourseRepository;
#[cfg(test)]
pub use resource::MockResourceRepository;
#[cfg(test)]
pub use section::MockSectionRepository;
