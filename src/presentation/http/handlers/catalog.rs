//! Catalog Handlers
//!
//! Lookups for the category, subcategory and level pickers.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::response::{CategoryResponse, LevelResponse, SubCategoryResponse};
use crate::application::services::{CatalogError, CatalogService};
use crate::shared::error::AppError;
use crate::shared::validation::parse_id;
use crate::startup::AppState;

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::CategoryNotFound => AppError::NotFound("Category not found".into()),
            CatalogError::Persistence(msg) => AppError::Persistence(msg),
        }
    }
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.catalog_service().list_categories().await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Subcategories selectable under a category
pub async fn list_subcategories(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<SubCategoryResponse>>, AppError> {
    let category_id = parse_id(&category_id, "category")?;

    let options = state
        .catalog_service()
        .subcategory_options(category_id)
        .await?;

    Ok(Json(options.into_iter().map(SubCategoryResponse::from).collect()))
}

pub async fn list_levels(
    State(state): State<AppState>,
) -> Result<Json<Vec<LevelResponse>>, AppError> {
    let levels = state.catalog_service().list_levels().await?;
    Ok(Json(levels.into_iter().map(LevelResponse::from).collect()))
}
