//! Shared application state for the `pwkeep` backend.

use crate::store::EntryStore;

/// Shared application state passed to all HTTP handlers via `Arc`.
#[derive(Debug)]
pub struct AppState {
    /// The password collection.
    pub store: EntryStore,
}

impl AppState {
    #[must_use]
    pub fn new(store: EntryStore) -> Self {
        Self { store }
    }
}
