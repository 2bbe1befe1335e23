//! Command execution logic.
//!
//! Every mutating command goes through the store (which persists and
//! re-renders the listing) and then rewrites the configured page, so the page
//! on disk always reflects the stored issues.

use anyhow::{Result, bail};

use super::args::{
    AddArgs, CloseArgs, DeleteArgs, InitArgs, ListArgs, RenderArgs, ResetArgs, ShowArgs,
};
use crate::app::App;
use crate::domain::{IssueId, IssueStatus, NewIssue};
use crate::error::Error;
use crate::output::{self, OutputConfig, OutputMode};

/// Attach a recovery hint to store corruption errors.
fn with_recovery_hint(err: Error) -> anyhow::Error {
    if matches!(err, Error::CorruptStore { .. }) {
        anyhow::Error::new(err)
            .context("Issue store is unreadable; run `tracklet reset --force` to start over")
    } else {
        err.into()
    }
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, args.key.as_deref()).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "tracklet_dir": result.tracklet_dir.display().to_string(),
            "config_file": result.config_file.display().to_string(),
            "data_dir": result.data_dir.as_ref().map(|d| d.display().to_string()),
            "key": result.key,
        }))?,
        OutputMode::Text if !args.quiet => {
            println!("Initialized tracklet in {}", result.tracklet_dir.display());
            println!("  Config: {}", result.config_file.display());
            if let Some(dir) = &result.data_dir {
                println!("  Data:   {}", dir.display());
            }
            println!("  Key:    {}", result.key);
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute the add command
pub async fn execute_add(app: &mut App, args: &AddArgs, output_mode: OutputMode) -> Result<()> {
    let new_issue = NewIssue::new(
        args.description.clone(),
        args.severity.clone(),
        args.assigned_to.clone().unwrap_or_default(),
    );

    let issue = app
        .store_mut()
        .add(new_issue)
        .await
        .map_err(with_recovery_hint)?;
    app.write_page(None).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&issue)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!("{} {}", output::success("Added issue", &config), issue.id);
        }
    }

    Ok(())
}

/// Execute the list command
pub async fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let mut issues = app.store().load().await.map_err(with_recovery_hint)?;

    if let Some(status) = args.status {
        let status = IssueStatus::from(status);
        issues.retain(|issue| issue.status == status);
    }

    output::print_issues(&issues, output_mode)?;
    Ok(())
}

/// Execute the show command
pub async fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let issue = app
        .store()
        .get(&IssueId::new(args.issue_id.as_str()))
        .await
        .map_err(with_recovery_hint)?;

    output::print_issue(&issue, output_mode)?;
    Ok(())
}

/// Execute the close command
pub async fn execute_close(app: &mut App, args: &CloseArgs, output_mode: OutputMode) -> Result<()> {
    let issue = app
        .store_mut()
        .set_status_closed(&IssueId::new(args.issue_id.as_str()))
        .await
        .map_err(with_recovery_hint)?;
    app.write_page(None).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&issue)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!("{} {}", output::success("Closed issue", &config), issue.id);
        }
    }

    Ok(())
}

/// Execute the delete command
pub async fn execute_delete(
    app: &mut App,
    args: &DeleteArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let issue = app
        .store_mut()
        .delete(&IssueId::new(args.issue_id.as_str()))
        .await
        .map_err(with_recovery_hint)?;
    app.write_page(None).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "deleted": issue,
        }))?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!("{} {}", output::success("Deleted issue", &config), issue.id);
        }
    }

    Ok(())
}

/// Execute the render command
pub async fn execute_render(
    app: &mut App,
    args: &RenderArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let issues = app.store_mut().refresh().await?;

    // The page itself is the output; --json does not apply
    if args.stdout {
        let html = crate::render::render_page(
            &app.config().page.title,
            app.store().listing().content(),
        )?;
        print!("{html}");
        return Ok(());
    }

    let path = app.write_page(args.output.as_deref()).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "issues": issues.len(),
        }))?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{} {} ({} issue(s))",
                output::success("Rendered", &config),
                path.display(),
                issues.len()
            );
        }
    }

    Ok(())
}

/// Execute the reset command
pub async fn execute_reset(app: &mut App, args: &ResetArgs, output_mode: OutputMode) -> Result<()> {
    if !args.force {
        let config = OutputConfig::from_env();
        bail!(
            "{}",
            output::error(
                "Refusing to discard stored issues without --force",
                &config
            )
        );
    }

    app.store_mut().reset().await?;
    app.write_page(None).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "reset": true,
            "key": app.store().key(),
        }))?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            println!(
                "{} key '{}'",
                output::success("Reset", &config),
                app.store().key()
            );
        }
    }

    Ok(())
}
