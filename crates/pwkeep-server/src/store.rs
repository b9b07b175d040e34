//! Entry store for the development backend.
//!
//! Entries are kept in a `BTreeMap` keyed by id behind a `RwLock`. Ids are
//! handed out sequentially, so key order is also creation order. When a
//! database file is configured, the collection is loaded from it on open and
//! the whole file is rewritten after every mutation, in the same
//! `{"passwords": [...]}` layout a `db.json` uses. A mutation is committed
//! to memory only after the file write succeeds.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use pwkeep_core::{Entry, EntryId, NewEntryBody};

/// Errors from the entry store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No entry with this id.
    #[error("password entry {id} not found")]
    NotFound { id: EntryId },

    /// Reading or writing the database file failed.
    #[error("database file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every id up to `u64::MAX` has been handed out.
    #[error("no entry ids left to assign")]
    IdsExhausted,

    /// The database file does not hold a valid collection.
    #[error("database file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DbFile {
    #[serde(default)]
    passwords: Vec<Entry>,
}

#[derive(Debug)]
struct Inner {
    entries: BTreeMap<EntryId, Entry>,
    /// `None` once `u64::MAX` has been used.
    next_id: Option<EntryId>,
}

/// The `/passwords` collection.
#[derive(Debug)]
pub struct EntryStore {
    inner: RwLock<Inner>,
    db_file: Option<PathBuf>,
}

impl EntryStore {
    /// Create an empty, memory-only store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_entries(Vec::new(), None)
    }

    /// Open a store, loading `db_file` if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Json`] if its contents are not a collection.
    pub async fn open(db_file: Option<PathBuf>) -> Result<Self, StoreError> {
        let Some(path) = db_file else {
            return Ok(Self::in_memory());
        };

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str::<DbFile>(&text)?.passwords,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        info!(path = %path.display(), count = entries.len(), "loaded database file");
        Ok(Self::from_entries(entries, Some(path)))
    }

    fn from_entries(entries: Vec<Entry>, db_file: Option<PathBuf>) -> Self {
        let entries: BTreeMap<EntryId, Entry> = entries.into_iter().map(|e| (e.id, e)).collect();
        let next_id = entries.keys().next_back().map_or(Some(1), |max| max.checked_add(1));
        Self {
            inner: RwLock::new(Inner { entries, next_id }),
            db_file,
        }
    }

    /// All entries in id order.
    pub async fn list(&self) -> Vec<Entry> {
        self.inner.read().await.entries.values().cloned().collect()
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no entry has this id.
    pub async fn get(&self, id: EntryId) -> Result<Entry, StoreError> {
        self.inner
            .read()
            .await
            .entries
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    /// Insert a new entry under the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdsExhausted`] if no id is left, or
    /// [`StoreError::Io`] if the database file cannot be written.
    pub async fn create(&self, body: NewEntryBody) -> Result<Entry, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id.ok_or(StoreError::IdsExhausted)?;
        let entry = body.with_id(id);
        let mut entries = inner.entries.clone();
        entries.insert(id, entry.clone());
        self.persist(&entries).await?;
        inner.entries = entries;
        inner.next_id = id.checked_add(1);
        debug!(id, "entry created");
        Ok(entry)
    }

    /// Replace every non-id field of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no entry has this id, or
    /// [`StoreError::Io`] if the database file cannot be written.
    pub async fn replace(&self, id: EntryId, body: NewEntryBody) -> Result<Entry, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.entries.contains_key(&id) {
            return Err(StoreError::NotFound { id });
        }
        let entry = body.with_id(id);
        let mut entries = inner.entries.clone();
        entries.insert(id, entry.clone());
        self.persist(&entries).await?;
        inner.entries = entries;
        debug!(id, "entry replaced");
        Ok(entry)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no entry has this id, or
    /// [`StoreError::Io`] if the database file cannot be written.
    pub async fn delete(&self, id: EntryId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let mut entries = inner.entries.clone();
        if entries.remove(&id).is_none() {
            return Err(StoreError::NotFound { id });
        }
        self.persist(&entries).await?;
        inner.entries = entries;
        debug!(id, "entry deleted");
        Ok(())
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    /// Write `entries` to the database file. Called with the write lock held,
    /// before the new state is committed to memory.
    async fn persist(&self, entries: &BTreeMap<EntryId, Entry>) -> Result<(), StoreError> {
        let Some(path) = &self.db_file else {
            return Ok(());
        };
        let db = DbFile {
            passwords: entries.values().cloned().collect(),
        };
        let json = serde_json::to_vec_pretty(&db)?;
        write_atomic(path, &json).await
    }
}

async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    tokio::fs::write(&tmp, data).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}
