//! Idea input constants and validation.

use crate::error::CoreError;

/// Maximum length for an idea title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Minimum description length the HTTP boundary enforces on submission.
pub const MIN_DESCRIPTION_LENGTH: usize = 20;

/// Maximum length for a domain tag.
pub const MAX_DOMAIN_LENGTH: usize = 100;

/// Reject blank titles, descriptions, or domains.
///
/// Domains are free text; the UI offers a fixed list but nothing here
/// restricts the value beyond being non-blank.
pub fn validate_new_idea(title: &str, description: &str, domain: &str) -> Result<(), CoreError> {
    let fields = [
        ("title", title),
        ("description", description),
        ("domain", domain),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("Idea {name} must not be empty")));
        }
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Idea title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    if domain.chars().count() > MAX_DOMAIN_LENGTH {
        return Err(CoreError::Validation(format!(
            "Idea domain exceeds maximum length of {MAX_DOMAIN_LENGTH} characters"
        )));
    }

    Ok(())
}
