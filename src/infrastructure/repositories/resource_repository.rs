//! Resource Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Resource, ResourceRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ResourceRow {
    id: Uuid,
    section_id: Uuid,
    name: String,
    file_url: String,
    created_at: DateTime<Utc>,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Resource {
            id: row.id,
            section_id: row.section_id,
            name: row.name,
            file_url: row.file_url,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL resource repository implementation.
#[derive(Clone)]
pub struct PgResourceRepository {
    pool: PgPool,
}

impl PgResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for PgResourceRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, AppError> {
        let row = sqlx::query_as::<_, ResourceRow>(
            "SELECT id, section_id, name, file_url, created_at FROM resources WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Resource::from))
    }

    async fn find_by_section_id(&self, section_id: Uuid) -> Result<Vec<Resource>, AppError> {
        let rows = sqlx::query_as::<_, ResourceRow>(
            r#"
            SELECT id, section_id, name, file_url, created_at
            FROM resources
            WHERE section_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Resource::from).collect())
    }

    async fn create(&self, resource: &Resource) -> Result<Resource, AppError> {
        let row = sqlx::query_as::<_, ResourceRow>(
            r#"
            INSERT INTO resources (id, section_id, name, file_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, section_id, name, file_url, created_at
            "#,
        )
        .bind(resource.id)
        .bind(resource.section_id)
        .bind(&resource.name)
        .bind(&resource.file_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("Section not found".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Resource with id {} not found", id)));
        }

        Ok(())
    }
}
