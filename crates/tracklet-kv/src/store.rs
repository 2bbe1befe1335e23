//! The key-value store trait.

use crate::Result;
use async_trait::async_trait;

/// A string-to-string slot store.
///
/// Implementations must validate keys with [`validate_key`](crate::validate_key)
/// before touching any backing state, so every backend accepts and rejects the
/// same keys. The trait is object-safe and is normally used as
/// `Box<dyn KeyValueStore>`.
///
/// Writers own the store exclusively (`&mut self`); there is no locking between
/// processes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `None` if nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidKey` if the key is malformed
    /// - `Error::Io` if the backing storage cannot be read
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidKey` if the key is malformed
    /// - `Error::Io` if the backing storage cannot be written
    async fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`.
    ///
    /// Removing a key that holds nothing is a no-op.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidKey` if the key is malformed
    /// - `Error::Io` if the backing storage cannot be modified
    async fn remove_item(&mut self, key: &str) -> Result<()>;

    /// List all keys currently holding a value, sorted.
    async fn keys(&self) -> Result<Vec<String>>;
}
