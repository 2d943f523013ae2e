//! Field-level checks that collect every problem as a readable message
//! instead of failing on the first one.
//!
//! These back form-style feedback at the API edge. The aggregate still
//! enforces its own invariants on every construction and mutation.

use crate::service::UpdateTemplate;
use crate::template::{
    placeholders, NewTemplate, TemplateArgument, TemplateMessage, MAX_DESCRIPTION_LEN, MAX_TAGS,
    MAX_TAG_LEN, MAX_TEMPLATE_NAME_LEN,
};

fn check_name(name: &str, errors: &mut Vec<String>) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        errors.push("Template name is required".to_string());
    } else if trimmed.chars().count() > MAX_TEMPLATE_NAME_LEN {
        errors.push(format!(
            "Template name must be {MAX_TEMPLATE_NAME_LEN} characters or less"
        ));
    }
}

fn check_description(description: Option<&str>, errors: &mut Vec<String>) {
    if let Some(d) = description {
        if d.trim().chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(format!(
                "Description must be {MAX_DESCRIPTION_LEN} characters or less"
            ));
        }
    }
}

fn check_messages(messages: &[TemplateMessage], errors: &mut Vec<String>) {
    if messages.is_empty() {
        errors.push("At least one message is required".to_string());
    }
    for (i, message) in messages.iter().enumerate() {
        if message.content.trim().is_empty() {
            errors.push(format!("Message {} content must not be empty", i + 1));
        }
    }
}

fn check_arguments(arguments: &[TemplateArgument], errors: &mut Vec<String>) {
    let mut seen: Vec<&str> = Vec::with_capacity(arguments.len());
    for (i, argument) in arguments.iter().enumerate() {
        let name = argument.name.trim();
        if name.is_empty() {
            errors.push(format!("Argument {} name must not be empty", i + 1));
            continue;
        }
        if seen.contains(&name) {
            errors.push(format!("Duplicate argument name '{name}'"));
        } else {
            seen.push(name);
        }
    }
}

fn check_tags(tags: &[String], errors: &mut Vec<String>) {
    if tags.len() > MAX_TAGS {
        errors.push(format!("Maximum {MAX_TAGS} tags allowed"));
    }
    if tags.iter().any(|t| t.trim().is_empty()) {
        errors.push("Tags must not be empty".to_string());
    }
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.chars().count() > MAX_TAG_LEN {
            errors.push(format!(
                "Tag '{trimmed}' must be {MAX_TAG_LEN} characters or less"
            ));
        }
    }
}

/// Check a template about to be created. Empty result means valid.
pub fn validate_new_template(input: &NewTemplate) -> Vec<String> {
    let mut errors = Vec::new();
    check_name(&input.name, &mut errors);
    check_description(input.description.as_deref(), &mut errors);
    check_messages(&input.messages, &mut errors);
    check_arguments(&input.arguments, &mut errors);
    check_tags(&input.tags, &mut errors);
    errors
}

/// Check a partial update. Only fields that are present are examined.
pub fn validate_template_update(input: &UpdateTemplate) -> Vec<String> {
    let mut errors = Vec::new();
    if let Some(name) = &input.name {
        check_name(name, &mut errors);
    }
    if let Some(description) = &input.description {
        check_description(description.as_deref(), &mut errors);
    }
    if let Some(messages) = &input.messages {
        check_messages(messages, &mut errors);
    }
    if let Some(arguments) = &input.arguments {
        check_arguments(arguments, &mut errors);
    }
    if let Some(tags) = &input.tags {
        check_tags(tags, &mut errors);
    }
    errors
}

/// Placeholder names used in message content that no argument declares.
pub fn undeclared_placeholders(
    messages: &[TemplateMessage],
    arguments: &[TemplateArgument],
) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for message in messages {
        for name in placeholders(&message.content) {
            let declared = arguments.iter().any(|a| a.name.trim() == name);
            if !declared && !missing.contains(&name) {
                missing.push(name);
            }
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewTemplate {
        NewTemplate {
            name: "Summarizer".into(),
            description: Some("Summarizes text".into()),
            messages: vec![TemplateMessage::user("Summarize {{text}}")],
            arguments: vec![TemplateArgument {
                name: "text".into(),
                description: "Input".into(),
                required: true,
                kind: None,
            }],
            tags: vec!["nlp".into()],
            user_id: "0b6f5d3c-1a2b-4c3d-9e8f-7a6b5c4d3e2f".into(),
            is_public: false,
        }
    }

    #[test]
    fn valid_template_has_no_errors() {
        assert!(validate_new_template(&valid()).is_empty());
    }

    #[test]
    fn reports_every_failing_field() {
        let mut input = valid();
        input.name = "   ".into();
        input.messages.clear();
        input.tags = (0..6).map(|i| format!("t{i}")).collect();

        let errors = validate_new_template(&input);
        assert_eq!(
            errors,
            vec![
                "Template name is required".to_string(),
                "At least one message is required".to_string(),
                "Maximum 5 tags allowed".to_string(),
            ]
        );
    }

    #[test]
    fn name_over_limit() {
        let mut input = valid();
        input.name = "n".repeat(MAX_TEMPLATE_NAME_LEN + 1);
        assert_eq!(
            validate_new_template(&input),
            vec!["Template name must be 100 characters or less".to_string()]
        );
    }

    #[test]
    fn blank_message_and_duplicate_argument() {
        let mut input = valid();
        input.messages.push(TemplateMessage::user("  "));
        input.arguments.push(input.arguments[0].clone());

        let errors = validate_new_template(&input);
        assert!(errors.contains(&"Message 2 content must not be empty".to_string()));
        assert!(errors.contains(&"Duplicate argument name 'text'".to_string()));
    }

    #[test]
    fn over_long_tag_is_reported_with_other_problems() {
        let mut input = valid();
        input.name = String::new();
        input.tags = vec!["ok".into(), "x".repeat(MAX_TAG_LEN + 1)];

        let errors = validate_new_template(&input);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "Template name is required");
        assert!(errors[1].ends_with("must be 50 characters or less"));

        input.tags = vec![format!("  {}  ", "x".repeat(MAX_TAG_LEN))];
        input.name = "Fine".into();
        assert!(validate_new_template(&input).is_empty());
    }

    #[test]
    fn update_checks_tag_length() {
        let input = UpdateTemplate {
            tags: Some(vec!["é".repeat(MAX_TAG_LEN + 1)]),
            ..UpdateTemplate::default()
        };
        assert_eq!(validate_template_update(&input).len(), 1);
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate_template_update(&UpdateTemplate::default()).is_empty());
    }

    #[test]
    fn update_checks_only_present_fields() {
        let input = UpdateTemplate {
            name: Some(String::new()),
            messages: Some(vec![]),
            ..UpdateTemplate::default()
        };
        let errors = validate_template_update(&input);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("name"));
        assert!(errors[1].contains("message"));
    }

    #[test]
    fn update_clearing_description_is_valid() {
        let input = UpdateTemplate {
            description: Some(None),
            ..UpdateTemplate::default()
        };
        assert!(validate_template_update(&input).is_empty());

        let input = UpdateTemplate {
            description: Some(Some("d".repeat(MAX_DESCRIPTION_LEN + 1))),
            ..UpdateTemplate::default()
        };
        assert_eq!(validate_template_update(&input).len(), 1);
    }

    #[test]
    fn undeclared_placeholders_are_listed_once() {
        let messages = vec![
            TemplateMessage::system("Audience: {{audience}}"),
            TemplateMessage::user("{{text}} for {{audience}} in {{tone}}"),
        ];
        let args = valid().arguments;
        assert_eq!(
            undeclared_placeholders(&messages, &args),
            vec!["audience".to_string(), "tone".to_string()]
        );
    }
}
