//! Persistence contract consumed by the application service.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::template::Template;
use crate::types::{TemplateId, UserId};

/// Storage for template aggregates.
///
/// Implementations map every aggregate field losslessly and report backend
/// failures as [`CoreError::Repository`] without transport details.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>, CoreError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Template>, CoreError>;

    async fn find_public(&self) -> Result<Vec<Template>, CoreError>;

    /// Insert or overwrite by id.
    async fn save(&self, template: &Template) -> Result<(), CoreError>;

    async fn delete(&self, id: &TemplateId) -> Result<(), CoreError>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
