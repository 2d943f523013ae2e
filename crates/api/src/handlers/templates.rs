//! Handlers for prompt templates.
//!
//! Input is checked with the standalone validators first so the caller sees
//! every problem at once; the service then applies the aggregate's own
//! invariants and ownership rules.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use promptdeck_core::error::CoreError;
use promptdeck_core::service::UpdateTemplate;
use promptdeck_core::template::{NewTemplate, TemplateArgument, TemplateMessage};
use promptdeck_core::validation;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DataWithWarnings};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Request body for `POST /templates`.
#[derive(Debug, Deserialize)]
pub struct CreateTemplateBody {
    pub name: String,
    pub description: Option<String>,
    pub messages: Vec<TemplateMessage>,
    #[serde(default)]
    pub arguments: Vec<TemplateArgument>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Request body for `PUT /templates/{id}`. Absent keys are left unchanged;
/// `"description": null` clears the description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplateBody {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub is_public: Option<bool>,
    pub messages: Option<Vec<TemplateMessage>>,
    pub arguments: Option<Vec<TemplateArgument>>,
    pub tags: Option<Vec<String>>,
}

impl UpdateTemplateBody {
    fn into_update(self, id: String) -> UpdateTemplate {
        UpdateTemplate {
            id,
            name: self.name,
            description: self.description,
            is_public: self.is_public,
            messages: self.messages,
            arguments: self.arguments,
            tags: self.tags,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_valid(errors: Vec<String>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(errors))
    }
}

fn placeholder_warnings(messages: &[TemplateMessage], arguments: &[TemplateArgument]) -> Vec<String> {
    validation::undeclared_placeholders(messages, arguments)
        .into_iter()
        .map(|name| format!("Placeholder {{{{{name}}}}} has no matching argument"))
        .collect()
}

// ---------------------------------------------------------------------------
// GET /templates
// ---------------------------------------------------------------------------

/// List the caller's own templates.
pub async fn list_my_templates(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = state
        .templates
        .get_user_templates(&auth.user_id.to_string())
        .await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /templates/public
// ---------------------------------------------------------------------------

/// List every public template. Needs no token.
pub async fn list_public_templates(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.templates.get_public_templates().await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /templates
// ---------------------------------------------------------------------------

/// Create a template owned by the caller.
pub async fn create_template(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateTemplateBody>,
) -> AppResult<impl IntoResponse> {
    let input = NewTemplate {
        name: body.name,
        description: body.description,
        messages: body.messages,
        arguments: body.arguments,
        tags: body.tags,
        user_id: auth.user_id.to_string(),
        is_public: body.is_public,
    };
    ensure_valid(validation::validate_new_template(&input))?;
    let warnings = placeholder_warnings(&input.messages, &input.arguments);

    let created = state.templates.create_template(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataWithWarnings {
            data: created,
            warnings,
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}
// ---------------------------------------------------------------------------

/// Get a template the caller may see: public, or their own.
pub async fn get_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let template = state
        .templates
        .get_visible_template(&auth.user_id, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::template_not_found(&id)))?;
    Ok(Json(DataResponse { data: template }))
}

// ---------------------------------------------------------------------------
// PUT /templates/{id}
// ---------------------------------------------------------------------------

/// Partially update one of the caller's templates.
pub async fn update_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateTemplateBody>,
) -> AppResult<impl IntoResponse> {
    let input = body.into_update(id);
    ensure_valid(validation::validate_template_update(&input))?;

    let updated = state
        .templates
        .update_owned_template(&auth.user_id, input)
        .await?;
    let warnings = placeholder_warnings(updated.messages(), updated.arguments());
    Ok(Json(DataWithWarnings {
        data: updated,
        warnings,
    }))
}

// ---------------------------------------------------------------------------
// DELETE /templates/{id}
// ---------------------------------------------------------------------------

/// Delete one of the caller's templates.
pub async fn delete_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state
        .templates
        .delete_owned_template(&auth.user_id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
