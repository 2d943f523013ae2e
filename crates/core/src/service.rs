//! Template use cases on top of a [`TemplateRepository`].
//!
//! The service parses raw ids, loads aggregates, applies changes through the
//! aggregate's own mutators, and persists the result. Updates are
//! read-then-write without a version token: the last writer wins.

use std::sync::Arc;

use crate::error::CoreError;
use crate::repository::TemplateRepository;
use crate::template::{NewTemplate, Template, TemplateArgument, TemplateMessage};
use crate::types::{TemplateId, UserId};

/// Partial update of a template. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTemplate {
    pub id: String,
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub is_public: Option<bool>,
    pub messages: Option<Vec<TemplateMessage>>,
    pub arguments: Option<Vec<TemplateArgument>>,
    pub tags: Option<Vec<String>>,
}

impl UpdateTemplate {
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Application service for templates. Cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct TemplateService {
    repo: Arc<dyn TemplateRepository>,
}

impl TemplateService {
    pub fn new(repo: Arc<dyn TemplateRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_template(&self, input: NewTemplate) -> Result<Template, CoreError> {
        let template = Template::create(input)?;
        self.repo.save(&template).await?;
        tracing::info!(
            id = %template.id(),
            user_id = %template.user_id(),
            "Template created"
        );
        Ok(template)
    }

    /// Look up a template. A malformed id fails before the repository is
    /// consulted; a missing template is `Ok(None)`.
    pub async fn get_template_by_id(&self, id: &str) -> Result<Option<Template>, CoreError> {
        let id = TemplateId::parse(id)?;
        self.repo.find_by_id(&id).await
    }

    /// Like [`get_template_by_id`](Self::get_template_by_id) but hides
    /// private templates that `viewer` does not own.
    pub async fn get_visible_template(
        &self,
        viewer: &UserId,
        id: &str,
    ) -> Result<Option<Template>, CoreError> {
        let template = self.get_template_by_id(id).await?;
        Ok(template.filter(|t| t.is_public() || t.is_owned_by(viewer)))
    }

    pub async fn get_user_templates(&self, user_id: &str) -> Result<Vec<Template>, CoreError> {
        let user_id = UserId::parse(user_id)?;
        let items = self.repo.find_by_user(&user_id).await?;
        tracing::debug!(%user_id, count = items.len(), "Listed user templates");
        Ok(items)
    }

    pub async fn get_public_templates(&self) -> Result<Vec<Template>, CoreError> {
        let items = self.repo.find_public().await?;
        tracing::debug!(count = items.len(), "Listed public templates");
        Ok(items)
    }

    pub async fn update_template(&self, input: UpdateTemplate) -> Result<Template, CoreError> {
        self.apply_update(None, input).await
    }

    /// Update on behalf of `actor`, who must be allowed to edit the template.
    pub async fn update_owned_template(
        &self,
        actor: &UserId,
        input: UpdateTemplate,
    ) -> Result<Template, CoreError> {
        self.apply_update(Some(actor), input).await
    }

    pub async fn delete_template(&self, id: &str) -> Result<(), CoreError> {
        self.remove(None, id).await
    }

    /// Delete on behalf of `actor`, who must be allowed to edit the template.
    pub async fn delete_owned_template(&self, actor: &UserId, id: &str) -> Result<(), CoreError> {
        self.remove(Some(actor), id).await
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        self.repo.ping().await
    }

    async fn load_for_edit(
        &self,
        actor: Option<&UserId>,
        id: &str,
    ) -> Result<Template, CoreError> {
        let template_id = TemplateId::parse(id)?;
        let template = self
            .repo
            .find_by_id(&template_id)
            .await?
            .ok_or_else(|| CoreError::template_not_found(template_id))?;

        if let Some(actor) = actor {
            if !template.can_be_edited_by(actor) {
                tracing::warn!(id = %template_id, %actor, "Edit denied for non-owner");
                return Err(CoreError::Forbidden(
                    "Only the owner can modify this template".to_string(),
                ));
            }
        }
        Ok(template)
    }

    async fn apply_update(
        &self,
        actor: Option<&UserId>,
        input: UpdateTemplate,
    ) -> Result<Template, CoreError> {
        let mut template = self.load_for_edit(actor, &input.id).await?;

        if let Some(name) = input.name {
            template.update_name(&name)?;
        }
        if let Some(description) = input.description {
            template.update_description(description.as_deref())?;
        }
        if let Some(messages) = input.messages {
            template.replace_messages(messages)?;
        }
        if let Some(arguments) = input.arguments {
            template.replace_arguments(arguments)?;
        }
        if let Some(tags) = input.tags {
            template.replace_tags(tags)?;
        }
        match input.is_public {
            Some(true) => template.make_public(),
            Some(false) => template.make_private(),
            None => {}
        }

        self.repo.save(&template).await?;
        tracing::info!(id = %template.id(), "Template updated");
        Ok(template)
    }

    async fn remove(&self, actor: Option<&UserId>, id: &str) -> Result<(), CoreError> {
        let template = self.load_for_edit(actor, id).await?;
        self.repo.delete(&template.id()).await?;
        tracing::info!(id = %template.id(), "Template deleted");
        Ok(())
    }
}
