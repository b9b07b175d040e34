//! Observable in-memory entry cache.
//!
//! [`EntryCache`] holds the ordered projection of the remote collection that
//! presentation code renders from. It is built on a [`tokio::sync::watch`]
//! channel: every mutation is pushed to all subscribers, including ones that
//! turn out to be no-ops (replacing or removing an absent id).
//!
//! The cache itself never talks to the backend. Callers apply a mutation
//! only after the matching remote operation has succeeded; see
//! `pwkeep_client::PasswordService`.

use tokio::sync::watch;
use tracing::debug;

use crate::entry::{Entry, EntryId};

/// Ordered, observable list of entries.
///
/// All mutations go through the single underlying `watch::Sender`, so each
/// one is applied atomically and in call order.
#[derive(Debug)]
pub struct EntryCache {
    tx: watch::Sender<Vec<Entry>>,
}

impl EntryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Overwrite the whole cache. Always notifies.
    pub fn replace_all(&self, entries: Vec<Entry>) {
        debug!(count = entries.len(), "cache replaced");
        self.tx.send_replace(entries);
    }

    /// Append one entry at the end.
    pub fn append(&self, entry: Entry) {
        debug!(id = entry.id, "cache append");
        self.tx.send_modify(|list| list.push(entry));
    }

    /// Replace the entry with `id` in place. Returns `false` if no such entry
    /// is cached; subscribers are notified either way.
    pub fn replace_one(&self, id: EntryId, entry: Entry) -> bool {
        let mut replaced = false;
        self.tx.send_modify(|list| {
            if let Some(slot) = list.iter_mut().find(|e| e.id == id) {
                *slot = entry;
                replaced = true;
            }
        });
        debug!(id, replaced, "cache replace_one");
        replaced
    }

    /// Remove the entry with `id`, keeping the order of the rest. Returns
    /// `false` if no such entry is cached; subscribers are notified either way.
    pub fn remove_one(&self, id: EntryId) -> bool {
        let mut removed = false;
        self.tx.send_modify(|list| {
            let before = list.len();
            list.retain(|e| e.id != id);
            removed = list.len() != before;
        });
        debug!(id, removed, "cache remove_one");
        removed
    }

    /// Copy of the current ordered contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Entry> {
        self.tx.borrow().clone()
    }

    /// Look up a single cached entry.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<Entry> {
        self.tx.borrow().iter().find(|e| e.id == id).cloned()
    }

    /// Ids in cache order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntryId> {
        self.tx.borrow().iter().map(|e| e.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Subscribe to changes. The receiver starts with the current contents
    /// marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Entry>> {
        self.tx.subscribe()
    }
}

impl Default for EntryCache {
    fn default() -> Self {
        Self::new()
    }
}
