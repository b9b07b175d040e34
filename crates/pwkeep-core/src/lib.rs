//! Core library for `pwkeep`.
//!
//! Contains the password entry model, the reversible Base64 codec used to
//! obscure password values, and the observable in-memory entry cache. This
//! crate performs no I/O; the HTTP repository client and the synchronization
//! service live in `pwkeep-client`.

pub mod cache;
pub mod codec;
pub mod entry;
pub mod error;

pub use cache::EntryCache;
pub use entry::{Entry, EntryDraft, EntryId, NewEntryBody};
pub use error::{CodecError, ValidationError};
