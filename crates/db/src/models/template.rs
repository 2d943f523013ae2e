//! Template row model.

use promptdeck_core::template::{TemplateData, TemplateRecord};
use promptdeck_core::types::Timestamp;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `templates` table.
#[derive(Debug, Clone, FromRow)]
pub struct TemplateRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub is_public: bool,
    pub template_data: Json<TemplateData>,
    pub tags: Option<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TemplateRow> for TemplateRecord {
    fn from(row: TemplateRow) -> Self {
        TemplateRecord {
            id: row.id,
            name: row.name,
            description: row.description,
            user_id: row.user_id,
            is_public: row.is_public,
            template_data: row.template_data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
            tags: row.tags,
        }
    }
}

impl From<TemplateRecord> for TemplateRow {
    fn from(record: TemplateRecord) -> Self {
        TemplateRow {
            id: record.id,
            name: record.name,
            description: record.description,
            user_id: record.user_id,
            is_public: record.is_public,
            template_data: Json(record.template_data),
            tags: record.tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
