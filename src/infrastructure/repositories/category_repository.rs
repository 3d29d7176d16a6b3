//! Category Repository Implementation
//!
//! Reads the seeded catalog (categories, subcategories, levels).

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Category, CategoryRepository, Level, SubCategory};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct SubCategoryRow {
    id: Uuid,
    category_id: Uuid,
    name: String,
}

/// PostgreSQL catalog repository implementation.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let subs = sqlx::query_as::<_, SubCategoryRow>(
            "SELECT id, category_id, name FROM sub_categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_category: HashMap<Uuid, Vec<SubCategory>> = HashMap::new();
        for sub in subs {
            by_category.entry(sub.category_id).or_default().push(SubCategory {
                id: sub.id,
                category_id: sub.category_id,
                name: sub.name,
            });
        }

        Ok(categories
            .into_iter()
            .map(|c| Category {
                sub_categories: by_category.remove(&c.id).unwrap_or_default(),
                id: c.id,
                name: c.name,
            })
            .collect())
    }

    async fn list_levels(&self) -> Result<Vec<Level>, AppError> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM levels ORDER BY created_at ASC, name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Level { id, name })
            .collect())
    }
}
