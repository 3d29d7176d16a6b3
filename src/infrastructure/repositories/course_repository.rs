//! Course Repository Implementation
//!
//! PostgreSQL implementation of the CourseRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Course, CourseRepository};
use crate::shared::error::AppError;

/// Database row representation of the courses table.
#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    instructor_id: String,
    title: String,
    subtitle: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    category_id: Uuid,
    sub_category_id: Uuid,
    level_id: Option<Uuid>,
    price: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            id: self.id,
            instructor_id: self.instructor_id,
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            image_url: self.image_url,
            category_id: self.category_id,
            sub_category_id: self.sub_category_id,
            level_id: self.level_id,
            price: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Catalog references are validated by the service; a violation here
/// means the catalog changed underneath the request.
fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Course with this ID already exists".to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::Validation("Unknown category, subcategory or level".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL course repository implementation.
#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    /// Create a new PgCourseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, instructor_id, title, subtitle, description, image_url,
                   category_id, sub_category_id, level_id, price, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CourseRow::into_course))
    }

    async fn find_by_instructor(&self, instructor_id: &str) -> Result<Vec<Course>, AppError> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, instructor_id, title, subtitle, description, image_url,
                   category_id, sub_category_id, level_id, price, created_at, updated_at
            FROM courses
            WHERE instructor_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(instructor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }

    async fn create(&self, course: &Course) -> Result<Course, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            INSERT INTO courses (id, instructor_id, title, subtitle, description, image_url,
                                 category_id, sub_category_id, level_id, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, instructor_id, title, subtitle, description, image_url,
                      category_id, sub_category_id, level_id, price, created_at, updated_at
            "#,
        )
        .bind(course.id)
        .bind(&course.instructor_id)
        .bind(&course.title)
        .bind(&course.subtitle)
        .bind(&course.description)
        .bind(&course.image_url)
        .bind(course.category_id)
        .bind(course.sub_category_id)
        .bind(course.level_id)
        .bind(course.price)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into_course())
    }

    async fn update(&self, course: &Course) -> Result<Course, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            UPDATE courses
            SET title = $2,
                subtitle = $3,
                description = $4,
                image_url = $5,
                category_id = $6,
                sub_category_id = $7,
                level_id = $8,
                price = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, instructor_id, title, subtitle, description, image_url,
                      category_id, sub_category_id, level_id, price, created_at, updated_at
            "#,
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.subtitle)
        .bind(&course.description)
        .bind(&course.image_url)
        .bind(course.category_id)
        .bind(course.sub_category_id)
        .bind(course.level_id)
        .bind(course.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NotFound(format!("Course with id {} not found", course.id)))?;

        Ok(row.into_course())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Course with id {} not found", id)));
        }

        Ok(())
    }
}
