//! Persistence shape of a template.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::content::{TemplateArgument, TemplateMessage};
use crate::types::Timestamp;

/// Content blob stored in the `template_data` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    pub messages: Vec<TemplateMessage>,
    #[serde(default)]
    pub arguments: Vec<TemplateArgument>,
}

/// A template as stored: one row of the `templates` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub is_public: bool,
    pub template_data: TemplateData,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub tags: Option<Vec<String>>,
}
