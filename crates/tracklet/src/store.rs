//! The issue store.
//!
//! [`IssueStore`] owns a key-value backend, the key under which the issue
//! collection lives, and the [`Listing`] it renders into. Every mutation runs
//! the same cycle: load the full collection, change it in memory, write the
//! full collection back, then re-render the listing.
//!
//! # Example
//!
//! ```
//! use tracklet::domain::{IssueStatus, NewIssue};
//! use tracklet::store::IssueStore;
//! use tracklet_kv::MemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> tracklet::error::Result<()> {
//! let mut store = IssueStore::new(Box::new(MemoryStore::new()));
//!
//! let issue = store.add(NewIssue::new("Crash on save", "High", "alice")).await?;
//! store.set_status_closed(&issue.id).await?;
//!
//! let issues = store.load().await?;
//! assert_eq!(issues[0].status, IssueStatus::Closed);
//! assert!(store.listing().content().contains("Crash on save"));
//! # Ok(())
//! # }
//! ```

use crate::domain::{Issue, IssueId, IssueStatus, NewIssue};
use crate::error::{Error, Result};
use crate::id_generation::IdGenerator;
use crate::render::{Listing, render_listing};
use std::collections::HashSet;
use std::io;
use tracing::{debug, warn};
use tracklet_kv::{KeyValueStore, validate_key};

/// Key the issue collection is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "issues";

/// Issue collection persisted under one key of a [`KeyValueStore`].
pub struct IssueStore {
    storage: Box<dyn KeyValueStore>,
    key: String,
    listing: Listing,
}

impl std::fmt::Debug for IssueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueStore")
            .field("key", &self.key)
            .field("listing", &self.listing)
            .field("storage", &"<dyn KeyValueStore>")
            .finish()
    }
}

impl IssueStore {
    /// Create a store using [`DEFAULT_STORAGE_KEY`].
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            listing: Listing::new(),
        }
    }

    /// Create a store using a custom key.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the key is not a valid slot key.
    pub fn with_key(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            storage,
            key,
            listing: Listing::new(),
        })
    }

    /// The storage key holding the collection
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The listing rebuilt by [`render`](Self::render)
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// The underlying key-value backend
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Read and decode the stored collection.
    ///
    /// Unlike [`load`](Self::load), an absent blob is reported as
    /// [`Error::EmptyStore`].
    ///
    /// # Errors
    ///
    /// - `Error::EmptyStore` if nothing is stored yet
    /// - `Error::CorruptStore` if the blob cannot be decoded
    /// - `Error::Storage` if the backend fails
    pub async fn read(&self) -> Result<Vec<Issue>> {
        let blob = match self.storage.get_item(&self.key).await {
            Ok(blob) => blob,
            // Bytes that are not UTF-8 are a damaged blob, not a backend failure
            Err(tracklet_kv::Error::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(Error::CorruptStore {
                    key: self.key.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        match blob {
            Some(blob) => decode_issues(&self.key, &blob),
            None => Err(Error::EmptyStore {
                key: self.key.clone(),
            }),
        }
    }

    /// Load the stored collection in insertion order.
    ///
    /// An absent or blank blob yields an empty collection.
    ///
    /// # Errors
    ///
    /// - `Error::CorruptStore` if the blob cannot be decoded
    /// - `Error::Storage` if the backend fails
    pub async fn load(&self) -> Result<Vec<Issue>> {
        match self.read().await {
            Err(Error::EmptyStore { .. }) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Serialize `issues` and write them under the store key.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateIssueId` if two issues share an ID; nothing is
    ///   written
    /// - serialization or backend write failures
    pub async fn persist(&mut self, issues: &[Issue]) -> Result<()> {
        if let Some(id) = find_duplicate_id(issues) {
            return Err(Error::DuplicateIssueId(id.clone()));
        }
        let blob = serde_json::to_string(issues)?;
        self.storage.set_item(&self.key, &blob).await?;
        debug!(key = %self.key, count = issues.len(), "Persisted issues");
        Ok(())
    }

    /// Rebuild the listing from `issues`, replacing its previous content.
    ///
    /// # Errors
    ///
    /// Returns `Error::Render` if the template fails.
    pub fn render(&mut self, issues: &[Issue]) -> Result<()> {
        let html = render_listing(issues)?;
        self.listing.replace_content(html);
        Ok(())
    }

    /// Load and render, the way a page does when it is first shown.
    ///
    /// A corrupt blob is logged and rendered as an empty listing. The blob
    /// itself is left in place; use [`reset`](Self::reset) to discard it.
    ///
    /// # Errors
    ///
    /// Returns an error for backend or render failures. Corruption is not an
    /// error here.
    pub async fn refresh(&mut self) -> Result<Vec<Issue>> {
        let issues = match self.load().await {
            Ok(issues) => issues,
            Err(Error::CorruptStore { key, reason }) => {
                warn!(key = %key, reason = %reason, "Stored issues are corrupt, showing an empty listing");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        self.render(&issues)?;
        Ok(issues)
    }

    /// Look up one issue by ID.
    ///
    /// # Errors
    ///
    /// - `Error::IssueNotFound` if no issue has this ID
    /// - any error from [`load`](Self::load)
    pub async fn get(&self, id: &IssueId) -> Result<Issue> {
        self.load()
            .await?
            .into_iter()
            .find(|issue| &issue.id == id)
            .ok_or_else(|| Error::IssueNotFound(id.clone()))
    }

    /// Append a new open issue, persist, and re-render.
    ///
    /// The ID is freshly generated and checked against the loaded collection.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidField` if the submission fails validation
    /// - `Error::CorruptStore` if the existing blob cannot be decoded; nothing
    ///   is written in that case
    /// - backend, ID generation, or render failures
    pub async fn add(&mut self, new_issue: NewIssue) -> Result<Issue> {
        new_issue.validate()?;

        let mut issues = self.load().await?;
        let id = IdGenerator::with_existing(issues.iter().map(|issue| &issue.id)).generate()?;
        let issue = new_issue.into_issue(id);
        issues.push(issue.clone());

        self.persist(&issues).await?;
        self.render(&issues)?;

        debug!(id = %issue.id, "Added issue");
        Ok(issue)
    }

    /// Mark an issue as closed, persist, and re-render.
    ///
    /// Closing an already closed issue succeeds and leaves it closed.
    ///
    /// # Errors
    ///
    /// - `Error::IssueNotFound` if no issue has this ID; nothing is written
    /// - any error from [`load`](Self::load), persisting, or rendering
    pub async fn set_status_closed(&mut self, id: &IssueId) -> Result<Issue> {
        let mut issues = self.load().await?;
        let issue = issues
            .iter_mut()
            .find(|issue| &issue.id == id)
            .ok_or_else(|| Error::IssueNotFound(id.clone()))?;
        issue.status = IssueStatus::Closed;
        let closed = issue.clone();

        self.persist(&issues).await?;
        self.render(&issues)?;

        debug!(id = %id, "Closed issue");
        Ok(closed)
    }

    /// Remove an issue, persist, and re-render.
    ///
    /// Returns the removed issue.
    ///
    /// # Errors
    ///
    /// - `Error::IssueNotFound` if no issue has this ID; nothing is written
    /// - any error from [`load`](Self::load), persisting, or rendering
    pub async fn delete(&mut self, id: &IssueId) -> Result<Issue> {
        let mut issues = self.load().await?;
        let index = issues
            .iter()
            .position(|issue| &issue.id == id)
            .ok_or_else(|| Error::IssueNotFound(id.clone()))?;
        let removed = issues.remove(index);

        self.persist(&issues).await?;
        self.render(&issues)?;

        debug!(id = %id, remaining = issues.len(), "Deleted issue");
        Ok(removed)
    }

    /// Overwrite the stored collection with an empty one and re-render.
    ///
    /// This is the recovery path for a corrupt blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write or render fails.
    pub async fn reset(&mut self) -> Result<()> {
        self.persist(&[]).await?;
        self.render(&[])?;
        warn!(key = %self.key, "Issue store reset to an empty collection");
        Ok(())
    }
}

/// Decode a stored blob into an issue collection.
///
/// Blank blobs and the literal `null` count as [`Error::EmptyStore`]. Anything
/// that is not an array of issues, or that repeats an ID, is
/// [`Error::CorruptStore`].
pub(crate) fn decode_issues(key: &str, blob: &str) -> Result<Vec<Issue>> {
    if blob.trim().is_empty() {
        return Err(Error::EmptyStore {
            key: key.to_string(),
        });
    }

    let corrupt = |reason: String| Error::CorruptStore {
        key: key.to_string(),
        reason,
    };

    let issues = serde_json::from_str::<Option<Vec<Issue>>>(blob)
        .map_err(|e| corrupt(e.to_string()))?
        .ok_or_else(|| Error::EmptyStore {
            key: key.to_string(),
        })?;

    if let Some(id) = find_duplicate_id(&issues) {
        return Err(corrupt(format!("duplicate issue ID '{id}'")));
    }

    Ok(issues)
}

/// First ID that appears more than once in `issues`.
fn find_duplicate_id(issues: &[Issue]) -> Option<&IssueId> {
    let mut seen = HashSet::with_capacity(issues.len());
    issues
        .iter()
        .map(|issue| &issue.id)
        .find(|id| !seen.insert(*id))
}
