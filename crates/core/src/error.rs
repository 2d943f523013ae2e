/// Domain error type shared by value objects, the template aggregate,
/// the application service and repository implementations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A field value is malformed (bad UUID, empty or too-long string).
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<&'static str>,
    },

    /// A structural invariant of the aggregate would be broken.
    #[error("Business rule violated: {message}")]
    BusinessRule { message: String, rule: &'static str },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Opaque persistence failure. Carries no transport details.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl CoreError {
    /// Build a [`CoreError::Validation`] tied to a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            message: message.into(),
            field: Some(field),
        }
    }

    /// Build a [`CoreError::BusinessRule`] for the named rule.
    pub fn business_rule(rule: &'static str, message: impl Into<String>) -> Self {
        CoreError::BusinessRule {
            message: message.into(),
            rule,
        }
    }

    /// Not-found error for a template id.
    pub fn template_not_found(id: impl ToString) -> Self {
        CoreError::NotFound {
            entity: "Template",
            id: id.to_string(),
        }
    }
}
