//! Repository for the `templates` table.

use async_trait::async_trait;
use promptdeck_core::error::CoreError;
use promptdeck_core::repository::TemplateRepository;
use promptdeck_core::template::Template;
use promptdeck_core::types::{TemplateId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::template::TemplateRow;

const COLUMNS: &str = "id, name, description, user_id, is_public, template_data, tags, \
     created_at, updated_at";

/// Row-level queries for templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Find a template by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TemplateRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's templates, most recently updated first.
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<TemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates \
             WHERE user_id = $1 \
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List public templates, most recently updated first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<TemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates \
             WHERE is_public = true \
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert a row, or overwrite the mutable columns of an existing one.
    ///
    /// `user_id` and `created_at` are never changed by the overwrite.
    pub async fn upsert(pool: &PgPool, row: &TemplateRow) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO templates \
                (id, name, description, user_id, is_public, template_data, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                description = EXCLUDED.description, \
                is_public = EXCLUDED.is_public, \
                template_data = EXCLUDED.template_data, \
                tags = EXCLUDED.tags, \
                updated_at = EXCLUDED.updated_at",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.user_id)
        .bind(row.is_public)
        .bind(&row.template_data)
        .bind(&row.tags)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Hard-delete a template by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-backed [`TemplateRepository`].
#[derive(Clone)]
pub struct PgTemplateRepo {
    pool: PgPool,
}

impl PgTemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Log the backend failure and hand the domain an opaque error.
fn repo_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(error = %err, operation, "Template query failed");
        CoreError::Repository(format!("Failed to {operation}"))
    }
}

fn to_domain(row: TemplateRow) -> Result<Template, CoreError> {
    let id = row.id;
    Template::from_persistence(row.into()).map_err(|err| {
        tracing::error!(%id, error = %err, "Stored template is corrupt");
        CoreError::Repository("Failed to load template".to_string())
    })
}

#[async_trait]
impl TemplateRepository for PgTemplateRepo {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>, CoreError> {
        TemplateRepo::find_by_id(&self.pool, id.as_uuid())
            .await
            .map_err(repo_error("load template"))?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Template>, CoreError> {
        TemplateRepo::list_by_user(&self.pool, user_id.as_uuid())
            .await
            .map_err(repo_error("list templates"))?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn find_public(&self) -> Result<Vec<Template>, CoreError> {
        TemplateRepo::list_public(&self.pool)
            .await
            .map_err(repo_error("list public templates"))?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn save(&self, template: &Template) -> Result<(), CoreError> {
        let row = TemplateRow::from(template.to_record());
        TemplateRepo::upsert(&self.pool, &row)
            .await
            .map_err(repo_error("save template"))
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), CoreError> {
        let deleted = TemplateRepo::delete(&self.pool, id.as_uuid())
            .await
            .map_err(repo_error("delete template"))?;
        if !deleted {
            tracing::debug!(%id, "Delete matched no row");
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(repo_error("reach the database"))
    }
}
