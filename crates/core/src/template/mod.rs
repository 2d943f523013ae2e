//! The `Template` aggregate: a reusable prompt definition owned by a user.
//!
//! A template is created through [`Template::create`], which validates every
//! input field and stamps a fresh id and timestamps, or rebuilt from storage
//! through [`Template::from_persistence`]. Mutators validate their input
//! before touching any state and bump `updated_at` on success, so a failed
//! call leaves the aggregate exactly as it was.

pub mod content;
pub mod record;
pub mod values;

use chrono::Duration;
use serde::Serialize;

pub use content::{placeholders, MessageRole, TemplateArgument, TemplateMessage};
pub use record::{TemplateData, TemplateRecord};
pub use values::{
    normalize_tags, TemplateDescription, TemplateName, MAX_DESCRIPTION_LEN, MAX_TAGS,
    MAX_TAG_LEN, MAX_TEMPLATE_NAME_LEN,
};

use crate::error::CoreError;
use crate::types::{self, TemplateId, Timestamp, UserId};

/// Rule name reported when a template would end up with no messages.
pub const RULE_REQUIRES_MESSAGE: &str = "template_requires_message";

/// Input for [`Template::create`].
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub description: Option<String>,
    pub messages: Vec<TemplateMessage>,
    pub arguments: Vec<TemplateArgument>,
    pub tags: Vec<String>,
    /// Owner id as received; parsed during creation.
    pub user_id: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    id: TemplateId,
    name: TemplateName,
    description: Option<TemplateDescription>,
    user_id: UserId,
    is_public: bool,
    messages: Vec<TemplateMessage>,
    arguments: Vec<TemplateArgument>,
    tags: Vec<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

fn ensure_messages(messages: &[TemplateMessage]) -> Result<(), CoreError> {
    if messages.is_empty() {
        return Err(CoreError::business_rule(
            RULE_REQUIRES_MESSAGE,
            "A template must contain at least one message",
        ));
    }
    Ok(())
}

/// Argument names must be non-blank and unique after trimming.
fn ensure_arguments(arguments: &[TemplateArgument]) -> Result<(), CoreError> {
    let mut seen: Vec<&str> = Vec::with_capacity(arguments.len());
    for argument in arguments {
        let name = argument.name.trim();
        if name.is_empty() {
            return Err(CoreError::validation(
                "arguments",
                "Argument name must not be empty",
            ));
        }
        if seen.contains(&name) {
            return Err(CoreError::validation(
                "arguments",
                format!("Duplicate argument name '{name}'"),
            ));
        }
        seen.push(name);
    }
    Ok(())
}

impl Template {
    /// Validate `input` and build a brand-new template.
    pub fn create(input: NewTemplate) -> Result<Self, CoreError> {
        ensure_messages(&input.messages)?;
        let name = TemplateName::parse(&input.name)?;
        let description = TemplateDescription::parse(input.description.as_deref())?;
        let user_id = UserId::parse(&input.user_id)?;
        ensure_arguments(&input.arguments)?;
        let tags = normalize_tags(input.tags)?;

        let now = types::now();
        Ok(Self {
            id: TemplateId::generate(),
            name,
            description,
            user_id,
            is_public: input.is_public,
            messages: input.messages,
            arguments: input.arguments,
            tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a template from its stored record.
    ///
    /// Stored strings are trusted as-is. A record without messages is still
    /// rejected because the aggregate cannot exist in that state.
    pub fn from_persistence(record: TemplateRecord) -> Result<Self, CoreError> {
        ensure_messages(&record.template_data.messages)?;
        Ok(Self {
            id: TemplateId::from_uuid(record.id),
            name: TemplateName::from_stored(record.name),
            description: record.description.map(TemplateDescription::from_stored),
            user_id: UserId::from_uuid(record.user_id),
            is_public: record.is_public,
            messages: record.template_data.messages,
            arguments: record.template_data.arguments,
            tags: record.tags.unwrap_or_default(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Persistence shape of this template. Inverse of [`Template::from_persistence`].
    pub fn to_record(&self) -> TemplateRecord {
        TemplateRecord {
            id: self.id.as_uuid(),
            name: self.name.as_str().to_string(),
            description: self.description.as_ref().map(|d| d.as_str().to_string()),
            user_id: self.user_id.as_uuid(),
            is_public: self.is_public,
            template_data: TemplateData {
                messages: self.messages.clone(),
                arguments: self.arguments.clone(),
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags: (!self.tags.is_empty()).then(|| self.tags.clone()),
        }
    }

    // --- accessors ---

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn name(&self) -> &TemplateName {
        &self.name
    }

    pub fn description(&self) -> Option<&TemplateDescription> {
        self.description.as_ref()
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn messages(&self) -> &[TemplateMessage] {
        &self.messages
    }

    pub fn arguments(&self) -> &[TemplateArgument] {
        &self.arguments
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // --- ownership ---

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }

    /// Edit permission is ownership; there are no collaborator roles.
    pub fn can_be_edited_by(&self, user_id: &UserId) -> bool {
        self.is_owned_by(user_id)
    }

    // --- mutators ---

    pub fn update_name(&mut self, name: &str) -> Result<(), CoreError> {
        self.name = TemplateName::parse(name)?;
        self.touch();
        Ok(())
    }

    /// Replace the description. `None` or blank input clears it.
    pub fn update_description(&mut self, description: Option<&str>) -> Result<(), CoreError> {
        self.description = TemplateDescription::parse(description)?;
        self.touch();
        Ok(())
    }

    pub fn make_public(&mut self) {
        self.is_public = true;
        self.touch();
    }

    pub fn make_private(&mut self) {
        self.is_public = false;
        self.touch();
    }

    pub fn replace_messages(&mut self, messages: Vec<TemplateMessage>) -> Result<(), CoreError> {
        ensure_messages(&messages)?;
        self.messages = messages;
        self.touch();
        Ok(())
    }

    pub fn replace_arguments(&mut self, arguments: Vec<TemplateArgument>) -> Result<(), CoreError> {
        ensure_arguments(&arguments)?;
        self.arguments = arguments;
        self.touch();
        Ok(())
    }

    pub fn replace_tags(&mut self, tags: Vec<String>) -> Result<(), CoreError> {
        self.tags = normalize_tags(tags)?;
        self.touch();
        Ok(())
    }

    /// Advance `updated_at`, strictly past its previous value even when the
    /// clock has not moved at microsecond resolution.
    fn touch(&mut self) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = types::now().max(floor);
    }
}
