//! CLI argument structs for all commands.

use clap::Parser;
use std::path::PathBuf;

use super::types::IssueStatusArg;
use super::validators::{
    validate_assignee, validate_description, validate_issue_id, validate_severity,
    validate_storage_key,
};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Storage key the issue collection is kept under
    #[arg(short, long, value_parser = validate_storage_key)]
    pub key: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `add` command
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// What is wrong
    #[arg(short = 'D', long, value_parser = validate_description)]
    pub description: String,

    /// Severity label (the page form offers Low, Medium, High)
    #[arg(short, long, default_value = "Low", value_parser = validate_severity)]
    pub severity: String,

    /// Who the issue is assigned to
    #[arg(short, long, value_parser = validate_assignee)]
    pub assigned_to: Option<String>,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Only show issues with this status
    #[arg(short, long, value_enum)]
    pub status: Option<IssueStatusArg>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Issue ID to display
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: String,
}

/// Arguments for the `close` command
#[derive(Parser, Debug, Clone)]
pub struct CloseArgs {
    /// Issue ID to close
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: String,
}

/// Arguments for the `delete` command
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// Issue ID to delete
    #[arg(value_parser = validate_issue_id)]
    pub issue_id: String,
}

/// Arguments for the `render` command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Write the page here instead of the configured path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the page to stdout instead of writing a file
    ///
    /// The output is always HTML; the global `--json` flag has no effect here.
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Arguments for the `reset` command
#[derive(Parser, Debug, Clone)]
pub struct ResetArgs {
    /// Confirm that all stored issues will be discarded
    #[arg(short, long)]
    pub force: bool,
}
