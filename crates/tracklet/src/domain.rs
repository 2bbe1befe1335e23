//! Domain types for issue tracking.
//!
//! This module contains the issue record as it is persisted, plus the input
//! type used when a new issue is submitted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Maximum severity and assignee length in characters
pub const MAX_SHORT_FIELD_LENGTH: usize = 200;

/// Severity values offered by the issue form
pub const SEVERITY_LEVELS: [&str; 3] = ["Low", "Medium", "High"];

/// Unique identifier for an issue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    /// Create a new issue ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IssueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A tracked defect record.
///
/// Serialized with camelCase field names (`assignedTo`), matching the layout
/// stored by earlier versions of the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique identifier for the issue
    pub id: IssueId,

    /// Free-text description
    pub description: String,

    /// Severity label, usually one of [`SEVERITY_LEVELS`]
    pub severity: String,

    /// Person the issue is assigned to (may be empty)
    pub assigned_to: String,

    /// Current status
    pub status: IssueStatus,
}

impl Issue {
    /// Returns `true` if the issue has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == IssueStatus::Closed
    }
}

/// Status of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Issue is open
    Open,

    /// Issue has been closed
    Closed,
}

impl IssueStatus {
    /// The status as stored and displayed
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::Open => "Open",
            IssueStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data submitted through the issue form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Issue description
    pub description: String,

    /// Severity label
    pub severity: String,

    /// Assignee (may be empty)
    pub assigned_to: String,
}

impl NewIssue {
    /// Create a new issue submission
    pub fn new(
        description: impl Into<String>,
        severity: impl Into<String>,
        assigned_to: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            severity: severity.into(),
            assigned_to: assigned_to.into(),
        }
    }

    /// Validate the submission.
    ///
    /// Rules:
    /// - `description` must not be blank and is capped at [`MAX_DESCRIPTION_LENGTH`]
    /// - `severity` must not be blank and is capped at [`MAX_SHORT_FIELD_LENGTH`]
    /// - `assigned_to` may be empty and is capped at [`MAX_SHORT_FIELD_LENGTH`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] naming the first field that fails.
    pub fn validate(&self) -> Result<()> {
        check_field("description", &self.description, MAX_DESCRIPTION_LENGTH, true)?;
        check_field("severity", &self.severity, MAX_SHORT_FIELD_LENGTH, true)?;
        check_field("assignee", &self.assigned_to, MAX_SHORT_FIELD_LENGTH, false)?;
        Ok(())
    }

    /// Build the stored record for this submission with the given ID.
    ///
    /// Surrounding whitespace is trimmed and the status starts as
    /// [`IssueStatus::Open`].
    #[must_use]
    pub fn into_issue(self, id: IssueId) -> Issue {
        Issue {
            id,
            description: self.description.trim().to_string(),
            severity: self.severity.trim().to_string(),
            assigned_to: self.assigned_to.trim().to_string(),
            status: IssueStatus::Open,
        }
    }
}

fn check_field(field: &'static str, value: &str, max_len: usize, required: bool) -> Result<()> {
    let trimmed = value.trim();
    if required && trimmed.is_empty() {
        return Err(Error::InvalidField {
            field,
            reason: "cannot be empty".to_string(),
        });
    }
    if trimmed.chars().count() > max_len {
        return Err(Error::InvalidField {
            field,
            reason: format!("cannot exceed {max_len} characters"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_issue_serializes_with_camel_case_fields() {
        let issue = Issue {
            id: IssueId::new("abc"),
            description: "Crash on save".to_string(),
            severity: "High".to_string(),
            assigned_to: "alice".to_string(),
            status: IssueStatus::Open,
        };

        let json = serde_json::to_string(&issue).unwrap();
        assert_eq!(
            json,
            r#"{"id":"abc","description":"Crash on save","severity":"High","assignedTo":"alice","status":"Open"}"#
        );
    }

    #[test]
    fn test_issue_deserializes_closed_status() {
        let json = r#"{"id":"x","description":"d","severity":"Low","assignedTo":"","status":"Closed"}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.status, IssueStatus::Closed);
        assert!(issue.is_closed());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{"id":"x","description":"d","severity":"Low","assignedTo":"","status":"Pending"}"#;
        assert!(serde_json::from_str::<Issue>(json).is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(IssueStatus::Open.to_string(), "Open");
        assert_eq!(IssueStatus::Closed.to_string(), "Closed");
    }

    #[test]
    fn test_into_issue_trims_and_opens() {
        let issue = NewIssue::new("  Crash on save ", " High", "alice  ").into_issue(IssueId::new("id-1"));
        assert_eq!(issue.description, "Crash on save");
        assert_eq!(issue.severity, "High");
        assert_eq!(issue.assigned_to, "alice");
        assert_eq!(issue.status, IssueStatus::Open);
    }

    #[rstest]
    #[case::minimal(NewIssue::new("Crash", "Low", ""))]
    #[case::full(NewIssue::new("Crash on save", "High", "alice"))]
    #[case::max_description(NewIssue::new("d".repeat(MAX_DESCRIPTION_LENGTH), "Medium", "bob"))]
    fn test_validate_accepts(#[case] new_issue: NewIssue) {
        assert!(new_issue.validate().is_ok());
    }

    #[rstest]
    #[case::blank_description(NewIssue::new("   ", "Low", ""), "description")]
    #[case::blank_severity(NewIssue::new("Crash", "", ""), "severity")]
    #[case::long_description(NewIssue::new("d".repeat(MAX_DESCRIPTION_LENGTH + 1), "Low", ""), "description")]
    #[case::long_assignee(NewIssue::new("Crash", "Low", "a".repeat(MAX_SHORT_FIELD_LENGTH + 1)), "assignee")]
    fn test_validate_rejects(#[case] new_issue: NewIssue, #[case] expected_field: &str) {
        match new_issue.validate() {
            Err(Error::InvalidField { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }
}
