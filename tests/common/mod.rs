//! Common Test Utilities
//!
//! In-memory repositories, a router wired to them, and token helpers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use course_authoring::config::{
    AuthSettings, CorsSettings, DatabaseSettings, LogFormat, ServerSettings, Settings,
    TelemetrySettings,
};
use course_authoring::domain::{
    Category, CategoryRepository, Course, CourseRepository, Level, NewSection, Resource,
    ResourceRepository, Section, SectionRepository, SubCategory,
};
use course_authoring::infrastructure::database::HealthProbe;
use course_authoring::infrastructure::repositories::Repositories;
use course_authoring::presentation::middleware::Claims;
use course_authoring::shared::error::AppError;
use course_authoring::startup::{build_router, AppState};

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const INSTRUCTOR: &str = "instructor_test";

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
struct Tables {
    courses: Vec<Course>,
    sections: Vec<Section>,
    resources: Vec<Resource>,
}

/// Store backing every repository trait, with failure injection.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    categories: Vec<Category>,
    levels: Vec<Level>,
    fail_position_writes_after: Mutex<Option<usize>>,
    healthy: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            categories: vec![
                category("Design", &["Graphic Design", "Web Design"]),
                category("Business", &["Marketing", "Finance"]),
            ],
            levels: ["Beginner", "Intermediate", "Expert"]
                .iter()
                .map(|name| Level {
                    id: Uuid::new_v4(),
                    name: (*name).into(),
                })
                .collect(),
            fail_position_writes_after: Mutex::new(None),
            healthy: AtomicBool::new(true),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Interrupt every position write after `applied` entries of the batch
    /// have been staged; `None` switches the failure off.
    pub fn fail_position_writes_after(&self, applied: Option<usize>) {
        *self.fail_position_writes_after.lock().unwrap() = applied;
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Stored positions of a course, ordered by position.
    pub fn positions(&self, course_id: Uuid) -> Vec<i32> {
        let tables = self.tables.lock().unwrap();
        let mut positions: Vec<i32> = tables
            .sections
            .iter()
            .filter(|s| s.course_id == course_id)
            .map(|s| s.position)
            .collect();
        positions.sort();
        positions
    }

    pub fn resource_count(&self) -> usize {
        self.tables.lock().unwrap().resources.len()
    }
}

fn category(name: &str, subs: &[&str]) -> Category {
    let id = Uuid::new_v4();
    Category {
        id,
        name: name.into(),
        sub_categories: subs
            .iter()
            .map(|s| SubCategory {
                id: Uuid::new_v4(),
                category_id: id,
                name: (*s).into(),
            })
            .collect(),
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_instructor(&self, instructor_id: &str) -> Result<Vec<Course>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| c.instructor_id == instructor_id)
            .cloned()
            .collect();
        courses.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(courses)
    }

    async fn create(&self, course: &Course) -> Result<Course, AppError> {
        self.tables.lock().unwrap().courses.push(course.clone());
        Ok(course.clone())
    }

    async fn update(&self, course: &Course) -> Result<Course, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .courses
            .iter_mut()
            .find(|c| c.id == course.id)
            .ok_or_else(|| AppError::NotFound("Course not found".into()))?;
        *stored = Course {
            updated_at: Utc::now(),
            ..course.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        let section_ids: Vec<Uuid> = tables
            .sections
            .iter()
            .filter(|s| s.course_id == id)
            .map(|s| s.id)
            .collect();
        tables.resources.retain(|r| !section_ids.contains(&r.section_id));
        tables.sections.retain(|s| s.course_id != id);
        tables.courses.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl SectionRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Section>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.sections.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<Section>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut sections: Vec<Section> = tables
            .sections
            .iter()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.position);
        Ok(sections)
    }

    async fn append(&self, section: NewSection) -> Result<Section, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.courses.iter().any(|c| c.id == section.course_id) {
            return Err(AppError::NotFound("Course not found".into()));
        }
        let position = tables
            .sections
            .iter()
            .filter(|s| s.course_id == section.course_id)
            .map(|s| s.position + 1)
            .max()
            .unwrap_or(0);
        let now = Utc::now();
        let created = Section {
            id: section.id,
            course_id: section.course_id,
            title: section.title,
            description: None,
            video_url: None,
            position,
            is_free: false,
            created_at: now,
            updated_at: now,
        };
        tables.sections.push(created.clone());
        Ok(created)
    }

    async fn update(&self, section: &Section) -> Result<Section, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .sections
            .iter_mut()
            .find(|s| s.id == section.id)
            .ok_or_else(|| AppError::NotFound("Section not found".into()))?;
        stored.title = section.title.clone();
        stored.description = section.description.clone();
        stored.video_url = section.video_url.clone();
        stored.is_free = section.is_free;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        let removed = tables
            .sections
            .iter()
            .position(|s| s.id == id)
            .map(|idx| tables.sections.remove(idx))
            .ok_or_else(|| AppError::NotFound("Section not found".into()))?;
        for s in tables
            .sections
            .iter_mut()
            .filter(|s| s.course_id == removed.course_id && s.position > removed.position)
        {
            s.position -= 1;
        }
        tables.resources.retain(|r| r.section_id != id);
        Ok(())
    }

    async fn update_positions(
        &self,
        course_id: Uuid,
        positions: Vec<(Uuid, i32)>,
    ) -> Result<(), AppError> {
        let fail_after = *self.fail_position_writes_after.lock().unwrap();
        let mut tables = self.tables.lock().unwrap();
        let mut staged = tables.sections.clone();
        for (applied, (id, position)) in positions.into_iter().enumerate() {
            if fail_after == Some(applied) {
                return Err(AppError::Persistence("connection lost mid-batch".into()));
            }
            let section = staged
                .iter_mut()
                .find(|s| s.id == id && s.course_id == course_id)
                .ok_or_else(|| AppError::NotFound("Section not found".into()))?;
            section.position = position;
        }
        tables.sections = staged;
        Ok(())
    }
}

#[async_trait]
impl ResourceRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.resources.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_section_id(&self, section_id: Uuid) -> Result<Vec<Resource>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .resources
            .iter()
            .filter(|r| r.section_id == section_id)
            .cloned()
            .collect())
    }

    async fn create(&self, resource: &Resource) -> Result<Resource, AppError> {
        self.tables.lock().unwrap().resources.push(resource.clone());
        Ok(resource.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.tables.lock().unwrap().resources.retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.categories.clone())
    }

    async fn list_levels(&self) -> Result<Vec<Level>, AppError> {
        Ok(self.levels.clone())
    }
}

#[async_trait]
impl HealthProbe for InMemoryStore {
    async fn ping(&self) -> Result<Duration, AppError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(Duration::from_millis(1))
        } else {
            Err(AppError::Persistence("store unreachable".into()))
        }
    }
}

// =============================================================================
// Test application
// =============================================================================

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
            run_migrations: false,
        },
        auth: AuthSettings {
            jwt_secret: JWT_SECRET.into(),
            issuer: None,
        },
        cors: CorsSettings {
            allowed_origins: vec!["http://localhost:3000".into()],
        },
        telemetry: TelemetrySettings {
            format: LogFormat::Pretty,
        },
        environment: "test".into(),
    }
}

/// Mint a bearer token the way the identity provider would.
pub fn token_for(instructor_id: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: instructor_id.into(),
        iat: now,
        exp: now + 3600,
        iss: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn fake_title() -> String {
    Sentence(2..5).fake()
}

/// Router over an in-memory store, plus a token for [`INSTRUCTOR`].
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let repositories = Repositories {
            courses: store.clone(),
            sections: store.clone(),
            resources: store.clone(),
            catalog: store.clone(),
            health: store.clone(),
        };
        let router = build_router(AppState::new(repositories, test_settings()));

        Self {
            server: TestServer::new(router).unwrap(),
            store,
            token: token_for(INSTRUCTOR),
        }
    }

    /// Create a course in the first category and return its ID
    pub async fn create_course(&self, title: &str) -> String {
        let category = &self.store.categories()[0];
        let response = self
            .server
            .post("/api/v1/courses")
            .authorization_bearer(&self.token)
            .json(&json!({
                "title": title,
                "categoryId": category.id,
                "subCategoryId": category.sub_categories[0].id,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_str().unwrap().to_string()
    }

    /// Append a section and return its ID
    pub async fn create_section(&self, course_id: &str, title: &str) -> String {
        let response = self
            .server
            .post(&format!("/api/v1/courses/{}/sections", course_id))
            .authorization_bearer(&self.token)
            .json(&json!({ "title": title }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_str().unwrap().to_string()
    }

    /// Section titles of a course in display order
    pub async fn section_titles(&self, course_id: &str) -> Vec<String> {
        let response = self
            .server
            .get(&format!("/api/v1/courses/{}/sections", course_id))
            .authorization_bearer(&self.token)
            .await;
        response.assert_status_ok();
        response
            .json::<Vec<Value>>()
            .iter()
            .map(|s| s["title"].as_str().unwrap().to_string())
            .collect()
    }

    /// Course with sections A, B, C in that order; returns the course ID and
    /// the section IDs by title.
    pub async fn course_with_abc(&self) -> (String, [String; 3]) {
        let course_id = self.create_course(&fake_title()).await;
        let a = self.create_section(&course_id, "Section A").await;
        let b = self.create_section(&course_id, "Section B").await;
        let c = self.create_section(&course_id, "Section C").await;
        (course_id, [a, b, c])
    }

    pub async fn reorder(&self, course_id: &str, list: Value) -> axum_test::TestResponse {
        self.server
            .put(&format!("/api/v1/courses/{}/sections/reorder", course_id))
            .authorization_bearer(&self.token)
            .json(&json!({ "list": list }))
            .await
    }
}
