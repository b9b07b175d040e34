//! Error types for the `pwkeep` client.

use pwkeep_core::{EntryId, ValidationError};

/// All errors that can occur when talking to the password collection.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid client configuration (bad base URL, HTTP client build failure).
    #[error("pwkeep config error: {0}")]
    Config(String),

    /// A required field was empty. Raised before any request is sent.
    #[error("invalid entry: {0}")]
    Validation(#[from] ValidationError),

    /// The backend reported that the entry does not exist (404).
    #[error("password entry {id} not found")]
    NotFound {
        /// The id that was requested.
        id: EntryId,
    },

    /// The backend answered with a non-success status.
    #[error("pwkeep API error {status_code}: {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the backend, or `HTTP <status>`.
        message: String,
    },

    /// Request timed out.
    #[error("pwkeep request timed out")]
    Timeout,

    /// Network or HTTP client error.
    #[error("pwkeep network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend sent a body that is not the expected JSON.
    #[error("pwkeep json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a reqwest failure, keeping timeouts distinct from other network
    /// errors.
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(e)
        }
    }

    /// Whether this is a transport-level failure: the request did not
    /// complete with a usable success response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Timeout | Self::Network(_) | Self::Json(_)
        )
    }

    /// Whether the backend reported the target entry as absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
