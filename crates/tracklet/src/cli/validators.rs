//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::domain::{MAX_DESCRIPTION_LENGTH, MAX_SHORT_FIELD_LENGTH};

/// Validate an issue ID argument.
///
/// Stored IDs are opaque strings, so only the shape needed to pass one on a
/// command line is checked: non-empty after trimming, no inner whitespace.
pub fn validate_issue_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Issue ID cannot be empty".to_string());
    }

    if s.chars().any(char::is_whitespace) {
        return Err(format!("Invalid issue ID '{s}': IDs cannot contain whitespace"));
    }

    Ok(s.to_string())
}

/// Validate issue description.
///
/// Rules:
/// - Cannot be empty or whitespace-only
/// - Maximum [`MAX_DESCRIPTION_LENGTH`] characters
pub fn validate_description(s: &str) -> Result<String, String> {
    required_text("Description", s, MAX_DESCRIPTION_LENGTH)
}

/// Validate issue severity.
///
/// Any label is accepted; the page form offers Low, Medium and High.
pub fn validate_severity(s: &str) -> Result<String, String> {
    required_text("Severity", s, MAX_SHORT_FIELD_LENGTH)
}

/// Validate assignee name. Empty is allowed.
pub fn validate_assignee(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.chars().count() > MAX_SHORT_FIELD_LENGTH {
        return Err(format!(
            "Assignee cannot exceed {MAX_SHORT_FIELD_LENGTH} characters"
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a storage key.
///
/// Delegates to the slot store's key rules.
pub fn validate_storage_key(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    tracklet_kv::validate_key(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

fn required_text(label: &str, s: &str, max_len: usize) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(format!("{label} cannot be empty"));
    }

    let len = trimmed.chars().count();
    if len > max_len {
        return Err(format!(
            "{label} cannot exceed {max_len} characters (got {len})"
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::uuid("6f1c2e9a-3b4d-4e5f-8a7b-0c1d2e3f4a5b")]
    #[case::legacy("1A2B3C")]
    #[case::padded("  abc  ")]
    fn test_validate_issue_id_valid(#[case] id: &str) {
        assert_eq!(validate_issue_id(id).unwrap(), id.trim());
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::inner_space("a b")]
    #[case::tab("a\tb")]
    fn test_validate_issue_id_invalid(#[case] id: &str) {
        assert!(validate_issue_id(id).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert_eq!(validate_description("  Crash on save ").unwrap(), "Crash on save");
        assert!(validate_description("").is_err());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_severity() {
        assert_eq!(validate_severity("Critical").unwrap(), "Critical");
        assert!(validate_severity(" ").is_err());
    }

    #[test]
    fn test_validate_assignee() {
        assert_eq!(validate_assignee("").unwrap(), "");
        assert_eq!(validate_assignee(" alice ").unwrap(), "alice");
        assert!(validate_assignee(&"a".repeat(MAX_SHORT_FIELD_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_storage_key() {
        assert_eq!(validate_storage_key(" issues ").unwrap(), "issues");
        assert!(validate_storage_key("a/b").is_err());
    }
}
