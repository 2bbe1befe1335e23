//! Output formatting for CLI commands.
//!
//! Commands print either human-readable text or JSON for programmatic use.
//!
//! Semantic colors:
//!   - Success/Closed: green
//!   - Open:           yellow
//!   - Error:          red
//!   - Issue IDs:      cyan
//!   - Field labels:   dimmed

use crate::domain::{Issue, IssueStatus};
use colored::Colorize;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

/// Output mode for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic use
    Json,
}

/// Settings that control text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TRACKLET_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("TRACKLET_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

fn colorize_status(status: IssueStatus, config: &OutputConfig) -> String {
    let text = status.to_string();
    if !config.use_colors {
        return text;
    }
    match status {
        IssueStatus::Open => text.yellow().to_string(),
        IssueStatus::Closed => text.green().to_string(),
    }
}

fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Format one issue as a single summary line.
pub fn format_issue_line(issue: &Issue, config: &OutputConfig) -> String {
    let assignee = if issue.assigned_to.is_empty() {
        String::new()
    } else {
        format!(" {}", dimmed(&format!("@{}", issue.assigned_to), config))
    };
    format!(
        "{} [{}] [{}] {}{}",
        colorize_id(issue.id.as_str(), config),
        colorize_status(issue.status, config),
        issue.severity,
        issue.description,
        assignee
    )
}

/// Format all fields of an issue, one per line.
pub fn format_issue_details(issue: &Issue, config: &OutputConfig) -> String {
    let assignee = if issue.assigned_to.is_empty() {
        "(unassigned)"
    } else {
        issue.assigned_to.as_str()
    };
    [
        format!("{} {}", dimmed("ID:         ", config), colorize_id(issue.id.as_str(), config)),
        format!("{} {}", dimmed("Status:     ", config), colorize_status(issue.status, config)),
        format!("{} {}", dimmed("Severity:   ", config), issue.severity),
        format!("{} {}", dimmed("Assigned to:", config), assignee),
        format!("{} {}", dimmed("Description:", config), issue.description),
    ]
    .join("\n")
}

/// Print a list of issues.
pub fn print_issues(issues: &[Issue], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(issues),
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let mut stdout = io::stdout().lock();
            if issues.is_empty() {
                writeln!(stdout, "No issues found.")?;
                return Ok(());
            }
            for issue in issues {
                writeln!(stdout, "{}", format_issue_line(issue, &config))?;
            }
            writeln!(stdout)?;
            writeln!(stdout, "{} issue(s)", issues.len())?;
            Ok(())
        }
    }
}

/// Print a single issue in detail.
pub fn print_issue(issue: &Issue, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(issue),
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            writeln!(io::stdout().lock(), "{}", format_issue_details(issue, &config))
        }
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(io::stdout().lock(), "{json}")
}
