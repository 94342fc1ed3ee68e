//! Service trait for entry storage
//!
//! The gateway is agnostic to the underlying store: handlers only talk to an
//! `Arc<dyn EntryService>`.

use crate::core::entry::{DeleteSummary, Entry, EntryId, EntryPatch};
use anyhow::Result;
use async_trait::async_trait;

/// CRUD operations over the single collection of entries
///
/// Backends provide no transactions or conflict detection: concurrent writes
/// to the same entry are last-write-wins.
#[async_trait]
pub trait EntryService: Send + Sync {
    /// List all entries, `date` descending in plain string order
    ///
    /// Entries without a date come last.
    async fn list(&self) -> Result<Vec<Entry>>;

    /// Persist a new entry and return it as stored
    async fn create(&self, entry: Entry) -> Result<Entry>;

    /// Apply a patch to an existing entry
    ///
    /// Returns `Ok(None)` when no entry has this id; nothing is written then.
    async fn update(&self, id: &EntryId, patch: &EntryPatch) -> Result<Option<Entry>>;

    /// Remove an entry and return what was removed
    ///
    /// Returns `Ok(None)` when no entry has this id.
    async fn delete(&self, id: &EntryId) -> Result<Option<Entry>>;

    /// Remove every entry whose id is in `ids`
    ///
    /// Unknown ids are ignored.
    async fn delete_many(&self, ids: &[EntryId]) -> Result<DeleteSummary>;

    /// Release the backend connection
    ///
    /// Called once after the server stopped accepting requests.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}
