//! Section Repository Implementation
//!
//! PostgreSQL implementation of the SectionRepository trait.
//! Every write that moves positions runs in one transaction; the
//! deferred `(course_id, position)` unique constraint is checked at commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{NewSection, Section, SectionRepository};
use crate::shared::error::AppError;

/// Database row representation of the sections table.
#[derive(Debug, sqlx::FromRow)]
struct SectionRow {
    id: Uuid,
    course_id: Uuid,
    title: String,
    description: Option<String>,
    video_url: Option<String>,
    position: i32,
    is_free: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SectionRow {
    fn into_section(self) -> Section {
        Section {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            position: self.position,
            is_free: self.is_free,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Map constraint failures of a section write to domain errors.
fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Section positions changed concurrently".to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::NotFound("Course not found".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL section repository implementation.
#[derive(Clone)]
pub struct PgSectionRepository {
    pool: PgPool,
}

impl PgSectionRepository {
    /// Create a new PgSectionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionRepository for PgSectionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Section>, AppError> {
        let row = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, course_id, title, description, video_url, position, is_free,
                   created_at, updated_at
            FROM sections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SectionRow::into_section))
    }

    async fn find_by_course_id(&self, course_id: Uuid) -> Result<Vec<Section>, AppError> {
        let rows = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, course_id, title, description, video_url, position, is_free,
                   created_at, updated_at
            FROM sections
            WHERE course_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SectionRow::into_section).collect())
    }

    /// The trailing position is computed inside the insert; two racing
    /// appends collide on the unique constraint instead of sharing a slot.
    async fn append(&self, section: NewSection) -> Result<Section, AppError> {
        let row = sqlx::query_as::<_, SectionRow>(
            r#"
            INSERT INTO sections (id, course_id, title, position)
            SELECT $1, $2, $3, COALESCE(MAX(position) + 1, 0)
            FROM sections
            WHERE course_id = $2
            RETURNING id, course_id, title, description, video_url, position, is_free,
                      created_at, updated_at
            "#,
        )
        .bind(section.id)
        .bind(section.course_id)
        .bind(&section.title)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into_section())
    }

    async fn update(&self, section: &Section) -> Result<Section, AppError> {
        let row = sqlx::query_as::<_, SectionRow>(
            r#"
            UPDATE sections
            SET title = $2,
                description = $3,
                video_url = $4,
                is_free = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, course_id, title, description, video_url, position, is_free,
                      created_at, updated_at
            "#,
        )
        .bind(section.id)
        .bind(&section.title)
        .bind(&section.description)
        .bind(&section.video_url)
        .bind(section.is_free)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Section with id {} not found", section.id)))?;

        Ok(row.into_section())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let removed: Option<(Uuid, i32)> = sqlx::query_as(
            "DELETE FROM sections WHERE id = $1 RETURNING course_id, position",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((course_id, position)) = removed else {
            return Err(AppError::NotFound(format!("Section with id {} not found", id)));
        };

        sqlx::query(
            r#"
            UPDATE sections
            SET position = position - 1, updated_at = NOW()
            WHERE course_id = $1 AND position > $2
            "#,
        )
        .bind(course_id)
        .bind(position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await.map_err(map_write_error)?;
        Ok(())
    }

    async fn update_positions(
        &self,
        course_id: Uuid,
        positions: Vec<(Uuid, i32)>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for (section_id, position) in positions {
            let result = sqlx::query(
                r#"
                UPDATE sections
                SET position = $3, updated_at = NOW()
                WHERE id = $1 AND course_id = $2
                "#,
            )
            .bind(section_id)
            .bind(course_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(AppError::NotFound(format!(
                    "Section {} does not belong to course {}",
                    section_id, course_id
                )));
            }
        }

        tx.commit().await.map_err(map_write_error)?;
        Ok(())
    }
}
