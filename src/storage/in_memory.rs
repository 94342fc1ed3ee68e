//! In-memory implementation of EntryService for development and testing

use crate::core::{DeleteSummary, Entry, EntryId, EntryPatch, EntryService};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory entry store
///
/// Keeps entries in insertion order so that entries sharing a date list in
/// the order they were added. Uses RwLock for thread-safe access; clones
/// share the same map.
#[derive(Clone)]
pub struct InMemoryEntryStore {
    entries: Arc<RwLock<IndexMap<EntryId, Entry>>>,
}

impl InMemoryEntryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> Result<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryService for InMemoryEntryStore {
    async fn list(&self) -> Result<Vec<Entry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut listed: Vec<Entry> = entries.values().cloned().collect();
        // Stable sort; `None` orders below any date so undated entries come last.
        listed.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(listed)
    }

    async fn create(&self, entry: Entry) -> Result<Entry> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if entries.contains_key(&entry.id) {
            return Err(anyhow!("Entry {} already exists", entry.id));
        }
        entries.insert(entry.id, entry.clone());

        Ok(entry)
    }

    async fn update(&self, id: &EntryId, patch: &EntryPatch) -> Result<Option<Entry>> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entries.get_mut(id).map(|entry| {
            entry.apply(patch);
            entry.clone()
        }))
    }

    async fn delete(&self, id: &EntryId) -> Result<Option<Entry>> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entries.shift_remove(id))
    }

    async fn delete_many(&self, ids: &[EntryId]) -> Result<DeleteSummary> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let before = entries.len();
        entries.retain(|id, _| !ids.contains(id));

        Ok(DeleteSummary::deleted((before - entries.len()) as u64))
    }
}
