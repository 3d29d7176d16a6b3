//! Catalog Service
//!
//! Read-only lookups backing the course metadata pickers.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::services::category_selection::subcategory_options;
use crate::domain::{Category, CategoryRepository, Level, SubCategory};
use crate::shared::error::AppError;

/// Catalog service trait
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Subcategories selectable under a category
    async fn subcategory_options(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<SubCategory>, CatalogError>;

    async fn list_levels(&self) -> Result<Vec<Level>, CatalogError>;
}

/// Catalog service errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Category not found")]
    CategoryNotFound,

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<AppError> for CatalogError {
    fn from(e: AppError) -> Self {
        CatalogError::Persistence(e.to_string())
    }
}

/// CatalogService implementation
pub struct CatalogServiceImpl<K: CategoryRepository + ?Sized> {
    catalog_repo: Arc<K>,
}

impl<K: CategoryRepository + ?Sized> CatalogServiceImpl<K> {
    pub fn new(catalog_repo: Arc<K>) -> Self {
        Self { catalog_repo }
    }
}

#[async_trait]
impl<K: CategoryRepository + ?Sized + 'static> CatalogService for CatalogServiceImpl<K> {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.catalog_repo.list_categories().await?)
    }

    async fn subcategory_options(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<SubCategory>, CatalogError> {
        let categories = self.catalog_repo.list_categories().await?;
        if !categories.iter().any(|c| c.id == category_id) {
            return Err(CatalogError::CategoryNotFound);
        }
        Ok(subcategory_options(&categories, category_id).to_vec())
    }

    async fn list_levels(&self) -> Result<Vec<Level>, CatalogError> {
        Ok(self.catalog_repo.list_levels().await?)
    }
}
