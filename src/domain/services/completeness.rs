//! Authoring completeness.
//!
//! A course or section can be published only once every required field
//! is filled in. Field names are the camelCase names clients edit.

use serde::Serialize;

use crate::domain::entities::{Course, Section};

/// Required fields of an authoring form and which of them are still empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completeness {
    pub required: Vec<&'static str>,
    pub missing: Vec<&'static str>,
}

impl Completeness {
    fn from_checks(checks: &[(&'static str, bool)]) -> Self {
        Self {
            required: checks.iter().map(|(field, _)| *field).collect(),
            missing: checks
                .iter()
                .filter(|(_, filled)| !filled)
                .map(|(field, _)| *field)
                .collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Completeness of a course with `section_count` sections.
///
/// Category and subcategory are always set on a stored course; they are
/// listed so the required count matches the form.
pub fn course_completeness(course: &Course, section_count: usize) -> Completeness {
    Completeness::from_checks(&[
        ("title", !course.title.trim().is_empty()),
        ("description", filled(&course.description)),
        ("imageUrl", filled(&course.image_url)),
        ("categoryId", true),
        ("subCategoryId", true),
        ("levelId", course.level_id.is_some()),
        ("price", course.price.is_some()),
        ("sections", section_count > 0),
    ])
}

pub fn section_completeness(section: &Section) -> Completeness {
    Completeness::from_checks(&[
        ("title", !section.title.trim().is_empty()),
        ("description", filled(&section.description)),
        ("videoUrl", filled(&section.video_url)),
    ])
}
