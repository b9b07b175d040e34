//! Password entry model.
//!
//! [`Entry`] is the record as stored by the backend and held in the cache.
//! Its `encrypted_password` field always carries the output of
//! [`codec::encode`](crate::codec::encode), never plaintext. [`EntryDraft`] is
//! what callers hand to the repository client for create and update.

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{CodecError, ValidationError};

/// Backend-assigned entry identifier.
pub type EntryId = u64;

/// A stored credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub category: String,
    pub app: String,
    pub user_name: String,
    /// Encoded password. Not encrypted; see [`crate::codec`].
    pub encrypted_password: String,
}

impl Entry {
    /// Recover the plain password.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the stored value is not valid codec output.
    pub fn decoded_password(&self) -> Result<String, CodecError> {
        codec::decode(&self.encrypted_password)
    }

    /// Build a draft carrying this entry's fields and its decoded password,
    /// ready to be edited and sent back through an update.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the stored password cannot be decoded.
    pub fn to_draft(&self) -> Result<EntryDraft, CodecError> {
        Ok(EntryDraft {
            category: self.category.clone(),
            app: self.app.clone(),
            user_name: self.user_name.clone(),
            password: self.decoded_password()?,
        })
    }
}

/// Input for creating or fully replacing an entry.
///
/// `password` is encoded unconditionally by the repository client before
/// transmission. Passing an already-encoded value therefore stores it
/// encoded twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryDraft {
    pub category: String,
    pub app: String,
    pub user_name: String,
    pub password: String,
}

impl EntryDraft {
    /// Convenience constructor.
    pub fn new(
        category: impl Into<String>,
        app: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            app: app.into(),
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// Check that every required field is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] naming the first empty field, in
    /// the order category, app, userName, password.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("category", &self.category),
            ("app", &self.app),
            ("userName", &self.user_name),
            ("password", &self.password),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(ValidationError::Empty { field });
            }
        }
        Ok(())
    }

    /// Encode the password and produce the `POST` body.
    #[must_use]
    pub fn encode(&self) -> NewEntryBody {
        NewEntryBody {
            category: self.category.clone(),
            app: self.app.clone(),
            user_name: self.user_name.clone(),
            encrypted_password: codec::encode(&self.password),
        }
    }

    /// Encode the password and produce the full entry sent on `PUT`.
    #[must_use]
    pub fn encode_with_id(&self, id: EntryId) -> Entry {
        let body = self.encode();
        Entry {
            id,
            category: body.category,
            app: body.app,
            user_name: body.user_name,
            encrypted_password: body.encrypted_password,
        }
    }
}

/// Wire body for creating an entry: an [`Entry`] without its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntryBody {
    pub category: String,
    pub app: String,
    pub user_name: String,
    pub encrypted_password: String,
}

impl NewEntryBody {
    /// Attach a backend-assigned id.
    #[must_use]
    pub fn with_id(self, id: EntryId) -> Entry {
        Entry {
            id,
            category: self.category,
            app: self.app,
            user_name: self.user_name,
            encrypted_password: self.encrypted_password,
        }
    }
}
