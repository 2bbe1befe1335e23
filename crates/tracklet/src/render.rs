//! HTML rendering for issue listings.
//!
//! Markup is produced by askama templates (`templates/listing.html` and
//! `templates/page.html`). Both use the `.html` extension, so every
//! interpolated value is HTML-escaped; issue text can never inject markup.
//!
//! Close and Delete actions are rendered as buttons tagged with
//! `data-action` and `data-issue-id` attributes rather than inline script.
//! The page is a static snapshot: nothing on it handles those attributes or
//! submits the form, and it says so next to the form. Changes go through the
//! CLI, which rewrites the page afterwards.

use crate::domain::{Issue, IssueStatus, SEVERITY_LEVELS};
use crate::error::Result;
use askama::Template;

/// One issue as shown in the listing.
struct IssueCard<'a> {
    id: &'a str,
    status: &'static str,
    badge_class: &'static str,
    description: &'a str,
    severity: &'a str,
    assigned_to: &'a str,
}

impl<'a> From<&'a Issue> for IssueCard<'a> {
    fn from(issue: &'a Issue) -> Self {
        Self {
            id: issue.id.as_str(),
            status: issue.status.as_str(),
            badge_class: badge_class(issue.status),
            description: &issue.description,
            severity: &issue.severity,
            assigned_to: &issue.assigned_to,
        }
    }
}

fn badge_class(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::Open => "label-info",
        IssueStatus::Closed => "label-success",
    }
}

#[derive(Template)]
#[template(path = "listing.html")]
struct ListingTemplate<'a> {
    cards: &'a [IssueCard<'a>],
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    severity_levels: &'a [&'a str],
    listing: &'a str,
}

/// Render the listing fragment for `issues`, one card per issue in order.
///
/// # Errors
///
/// Returns `Error::Render` if the template fails to render.
pub fn render_listing(issues: &[Issue]) -> Result<String> {
    let cards: Vec<IssueCard<'_>> = issues.iter().map(IssueCard::from).collect();
    Ok(ListingTemplate { cards: &cards }.render()?)
}

/// Render a standalone page embedding an already-rendered listing.
///
/// `listing` is inserted verbatim; pass output of [`render_listing`] or
/// [`Listing::content`].
///
/// # Errors
///
/// Returns `Error::Render` if the template fails to render.
pub fn render_page(title: &str, listing: &str) -> Result<String> {
    Ok(PageTemplate {
        title,
        severity_levels: &SEVERITY_LEVELS,
        listing,
    }
    .render()?)
}

/// The container whose content is rebuilt on every render.
///
/// Rendering always replaces the whole content; nothing is patched
/// incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    content: String,
    generation: u64,
}

impl Listing {
    /// Create an empty listing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current rendered markup
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of times the content has been replaced
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the content wholesale
    pub fn replace_content(&mut self, content: String) {
        self.content = content;
        self.generation += 1;
    }
}
