//! Course ownership lookup shared by the services.
//!
//! A course that exists but belongs to another instructor is reported
//! exactly like a missing one.

use uuid::Uuid;

use crate::domain::{Course, CourseRepository};
use crate::shared::error::AppError;

/// Load `course_id` if `instructor_id` owns it.
pub async fn owned_course<C>(
    courses: &C,
    instructor_id: &str,
    course_id: Uuid,
) -> Result<Option<Course>, AppError>
where
    C: CourseRepository + ?Sized,
{
    let course = courses.find_by_id(course_id).await?;
    Ok(course.filter(|c| c.is_owned_by(instructor_id)))
}
