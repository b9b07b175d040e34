//! Error types for `pwkeep-core`.

/// Errors from [`crate::codec::decode`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// The input is not valid Base64 (bad alphabet, length, or padding).
    #[error("malformed encoded password: {reason}")]
    Malformed { reason: String },

    /// The input decoded to bytes that are not UTF-8 text.
    #[error("encoded password does not decode to UTF-8 text")]
    NotUtf8,
}

/// A required entry field was left empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The named field is empty.
    #[error("field '{field}' must not be empty")]
    Empty { field: &'static str },
}
