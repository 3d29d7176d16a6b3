//! Resource entity and repository trait.
//!
//! Maps to the `resources` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// File attachment of a section. Displayed in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub section_id: Uuid,
    pub name: String,

    /// Reference returned by the file upload widget
    pub file_url: String,

    pub created_at: DateTime<Utc>,
}

/// Repository trait for Resource data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, AppError>;

    /// Resources of a section, oldest first.
    async fn find_by_section_id(&self, section_id: Uuid) -> Result<Vec<Resource>, AppError>;

    async fn create(&self, resource: &Resource) -> Result<Resource, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
