//! Value enums for CLI arguments.

use clap::ValueEnum;

use crate::domain::IssueStatus;

/// Issue status as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IssueStatusArg {
    /// Open issues
    Open,
    /// Closed issues
    Closed,
}

impl From<IssueStatusArg> for IssueStatus {
    fn from(arg: IssueStatusArg) -> Self {
        match arg {
            IssueStatusArg::Open => IssueStatus::Open,
            IssueStatusArg::Closed => IssueStatus::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion() {
        assert_eq!(IssueStatus::from(IssueStatusArg::Open), IssueStatus::Open);
        assert_eq!(IssueStatus::from(IssueStatusArg::Closed), IssueStatus::Closed);
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!(IssueStatusArg::from_str("closed", true).unwrap(), IssueStatusArg::Closed);
        assert_eq!(IssueStatusArg::from_str("OPEN", true).unwrap(), IssueStatusArg::Open);
    }
}
