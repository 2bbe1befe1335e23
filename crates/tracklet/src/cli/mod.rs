//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize a new tracklet repository
//! - `add`: Add a new open issue
//! - `list`: List issues
//! - `show`: Show one issue
//! - `close`: Close an issue
//! - `delete`: Delete an issue
//! - `render`: Write the HTML page
//! - `reset`: Replace the stored collection with an empty one
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! tracklet add --description "Crash on save" --severity High --assigned-to alice
//! tracklet list --status open
//! tracklet close 6f1c2e9a-3b4d-4e5f-8a7b-0c1d2e3f4a5b
//! tracklet render --output index.html
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub use args::{AddArgs, CloseArgs, DeleteArgs, InitArgs, ListArgs, RenderArgs, ResetArgs, ShowArgs};
pub use types::IssueStatusArg;
pub use validators::{
    validate_assignee, validate_description, validate_issue_id, validate_severity,
    validate_storage_key,
};

/// Tracklet - a minimal issue tracker
///
/// Issues are stored as a JSON array under one key of a key-value store and
/// rendered into an HTML page after every change.
#[derive(Parser, Debug)]
#[command(name = "tracklet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new tracklet repository
    ///
    /// Creates the `.tracklet/` directory with configuration and a data directory.
    Init(InitArgs),

    /// Add a new issue
    ///
    /// The issue starts out open and gets a freshly generated ID.
    Add(AddArgs),

    /// List issues
    List(ListArgs),

    /// Show all fields of an issue
    Show(ShowArgs),

    /// Close an issue
    Close(CloseArgs),

    /// Delete an issue permanently
    Delete(DeleteArgs),

    /// Render the HTML page
    ///
    /// Writes the issue form and listing to the configured page path, or to
    /// `--output`.
    Render(RenderArgs),

    /// Replace the stored issues with an empty collection
    ///
    /// Use this to recover from a corrupt store. Requires `--force`.
    Reset(ResetArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            <Self as CommandFactory>::command().print_help()?;
            return Ok(());
        };

        match command {
            Commands::Init(args) => execute::execute_init(args, output_mode).await,
            Commands::Add(args) => {
                let mut app = open_app().await?;
                execute::execute_add(&mut app, args, output_mode).await
            }
            Commands::List(args) => {
                let app = open_app().await?;
                execute::execute_list(&app, args, output_mode).await
            }
            Commands::Show(args) => {
                let app = open_app().await?;
                execute::execute_show(&app, args, output_mode).await
            }
            Commands::Close(args) => {
                let mut app = open_app().await?;
                execute::execute_close(&mut app, args, output_mode).await
            }
            Commands::Delete(args) => {
                let mut app = open_app().await?;
                execute::execute_delete(&mut app, args, output_mode).await
            }
            Commands::Render(args) => {
                let mut app = open_app().await?;
                execute::execute_render(&mut app, args, output_mode).await
            }
            Commands::Reset(args) => {
                let mut app = open_app().await?;
                execute::execute_reset(&mut app, args, output_mode).await
            }
        }
    }
}

async fn open_app() -> Result<crate::app::App> {
    Ok(crate::app::App::from_directory(&std::env::current_dir()?).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "tracklet",
            "add",
            "--description",
            "Crash on save",
            "--severity",
            "High",
            "--assigned-to",
            "alice",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.description, "Crash on save");
                assert_eq!(args.severity, "High");
                assert_eq!(args.assigned_to.as_deref(), Some("alice"));
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_defaults() {
        let cli = Cli::try_parse_from(["tracklet", "add", "-D", "Crash"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.severity, "Low");
                assert_eq!(args.assigned_to, None);
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_global_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["tracklet", "list", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[rstest]
    #[case::blank_description(&["tracklet", "add", "--description", "   "])]
    #[case::blank_severity(&["tracklet", "add", "-D", "x", "--severity", ""])]
    #[case::blank_id(&["tracklet", "close", " "])]
    #[case::id_with_space(&["tracklet", "delete", "a b"])]
    #[case::bad_status(&["tracklet", "list", "--status", "pending"])]
    #[case::bad_key(&["tracklet", "init", "--key", "../x"])]
    fn test_parse_rejects(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_id_is_trimmed() {
        let cli = Cli::try_parse_from(["tracklet", "show", " id-1 "]).unwrap();
        match cli.command {
            Some(Commands::Show(args)) => assert_eq!(args.issue_id, "id-1"),
            other => panic!("expected show, got {other:?}"),
        }
    }
}
