//! `pwkeep` client.
//!
//! Talks to a remote `/passwords` JSON collection and keeps an observable
//! in-memory cache in sync with it. Passwords are Base64-encoded before they
//! leave the process; that encoding is **not** encryption.
//!
//! # Example
//!
//! ```rust,no_run
//! use pwkeep_client::{ClientConfig, PasswordService};
//! use pwkeep_core::EntryDraft;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = PasswordService::connect(ClientConfig::new("http://localhost:3000"))?;
//! service.load_all().await?;
//! service
//!     .add(&EntryDraft::new("Work", "GitHub", "alice", "secret123"))
//!     .await?;
//! for entry in service.cache().snapshot() {
//!     println!("{} {}", entry.app, entry.decoded_password()?);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod service;

pub use client::{HttpRepository, PasswordRepository};
pub use config::{COLLECTION_PATH, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use service::PasswordService;
