//! Validated string values held by a template: name, description, tags.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Maximum length for a template name, in characters.
pub const MAX_TEMPLATE_NAME_LEN: usize = 100;

/// Maximum length for a template description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1_000;

/// Maximum number of tags on a template.
pub const MAX_TAGS: usize = 5;

/// Maximum length of a single tag, in characters.
pub const MAX_TAG_LEN: usize = 50;

/// Trimmed, non-empty template name of at most [`MAX_TEMPLATE_NAME_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::validation(
                "name",
                "Template name must not be empty",
            ));
        }
        let len = trimmed.chars().count();
        if len > MAX_TEMPLATE_NAME_LEN {
            return Err(CoreError::validation(
                "name",
                format!("Template name too long: {len} chars (max {MAX_TEMPLATE_NAME_LEN})"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a stored value without re-validating it.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty description of at most [`MAX_DESCRIPTION_LEN`] characters.
///
/// Absence of a description is modelled as `Option<TemplateDescription>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TemplateDescription(String);

impl TemplateDescription {
    /// Parse an optional description. `None`, empty and whitespace-only input
    /// all yield `Ok(None)`.
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, CoreError> {
        let Some(trimmed) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let len = trimmed.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(CoreError::validation(
                "description",
                format!("Description too long: {len} chars (max {MAX_DESCRIPTION_LEN})"),
            ));
        }
        Ok(Some(Self(trimmed.to_string())))
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim every tag and enforce the count and per-tag limits.
pub fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::validation(
            "tags",
            format!("Too many tags: {} (max {MAX_TAGS})", tags.len()),
        ));
    }
    tags.into_iter()
        .map(|tag| {
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                return Err(CoreError::validation("tags", "Tags must not be empty"));
            }
            if trimmed.chars().count() > MAX_TAG_LEN {
                return Err(CoreError::validation(
                    "tags",
                    format!("Tag '{trimmed}' too long (max {MAX_TAG_LEN} chars)"),
                ));
            }
            Ok(trimmed.to_string())
        })
        .collect()
}
