//! Catalog entities: categories, subcategories and levels.
//!
//! Seeded by migration and read-only at runtime.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A top-level course category with its subcategories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub sub_categories: Vec<SubCategory>,
}

/// A subcategory, valid only under its parent category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
}

/// Course difficulty level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: Uuid,
    pub name: String,
}

/// Repository trait for catalog lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories with their subcategories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    /// All levels.
    async fn list_levels(&self) -> Result<Vec<Level>, AppError>;
}
