//! Slot key validation.
//!
//! File-backed stores turn keys into file names, so keys are restricted to a
//! conservative character set that cannot escape the store directory.

use crate::{Error, Result};

/// Maximum key length in bytes
pub const MAX_KEY_LENGTH: usize = 128;

/// Validate a slot key.
///
/// Requirements:
/// - 1 to [`MAX_KEY_LENGTH`] characters
/// - ASCII alphanumerics, `-`, `_` and `.` only
/// - Must not start with `.`
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] describing the first rule the key breaks.
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("key cannot be empty"));
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(invalid(&format!(
            "key cannot exceed {MAX_KEY_LENGTH} characters"
        )));
    }

    if key.starts_with('.') {
        return Err(invalid("key cannot start with '.'"));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(invalid(
            "key must contain only alphanumerics, '-', '_' and '.'",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_key("issues")]
    #[case::with_dash("issues-archive")]
    #[case::with_underscore("issues_v2")]
    #[case::with_dot("issues.backup")]
    #[case::single_char("i")]
    fn test_validate_key_valid(#[case] key: &str) {
        assert!(validate_key(key).is_ok());
    }

    #[rstest]
    #[case::empty("", "empty")]
    #[case::leading_dot(".issues", "start with '.'")]
    #[case::parent_dir("..", "start with '.'")]
    #[case::slash("a/b", "only alphanumerics")]
    #[case::backslash("a\\b", "only alphanumerics")]
    #[case::space("my issues", "only alphanumerics")]
    #[case::unicode("\u{00e9}t\u{00e9}", "only alphanumerics")]
    fn test_validate_key_invalid(#[case] key: &str, #[case] expected: &str) {
        let err = validate_key(key).unwrap_err().to_string();
        assert!(err.contains(expected), "unexpected error: {err}");
    }

    #[test]
    fn test_validate_key_length_limit() {
        let max = "k".repeat(MAX_KEY_LENGTH);
        assert!(validate_key(&max).is_ok());

        let too_long = "k".repeat(MAX_KEY_LENGTH + 1);
        assert!(validate_key(&too_long).is_err());
    }
}
