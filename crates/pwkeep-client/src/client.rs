//! Repository client for the remote `/passwords` collection.
//!
//! [`PasswordRepository`] is the seam the synchronization service is written
//! against; [`HttpRepository`] is the implementation that speaks JSON over
//! HTTP. Every request is sent exactly once: there is no retry, no backoff
//! and no idempotency key.

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use pwkeep_core::{Entry, EntryDraft, EntryId};

use crate::config::{COLLECTION_PATH, ClientConfig};
use crate::error::ClientError;

/// Remote CRUD operations on the password collection.
///
/// `create` and `update` take the password in the draft as given and encode
/// it before transmission, whatever it already looks like.
#[async_trait]
pub trait PasswordRepository: Send + Sync {
    /// Fetch the whole collection.
    async fn list_all(&self) -> Result<Vec<Entry>, ClientError>;

    /// Fetch one entry.
    async fn get_one(&self, id: EntryId) -> Result<Entry, ClientError>;

    /// Create an entry and return it with its backend-assigned id.
    async fn create(&self, draft: &EntryDraft) -> Result<Entry, ClientError>;

    /// Fully replace the non-id fields of an entry. Returns the entry as it
    /// was transmitted; whatever the backend echoes back is ignored.
    async fn update(&self, id: EntryId, draft: &EntryDraft) -> Result<Entry, ClientError>;

    /// Delete an entry.
    async fn delete(&self, id: EntryId) -> Result<(), ClientError>;
}

/// JSON-over-HTTP repository client.
#[derive(Debug, Clone)]
pub struct HttpRepository {
    collection_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl HttpRepository {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the base URL is not an `http(s)` URL
    /// or the HTTP client cannot be built.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(cfg: ClientConfig) -> Result<Self, ClientError> {
        let resolved = cfg.resolve();

        if !(resolved.base_url.starts_with("http://") || resolved.base_url.starts_with("https://"))
        {
            return Err(ClientError::Config(format!(
                "base url must start with http:// or https://, got '{}'",
                resolved.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(resolved.timeout)
            .user_agent(concat!("pwkeep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            collection_url: format!("{}{COLLECTION_PATH}", resolved.base_url),
            client,
        })
    }

    /// Full URL of the collection, e.g. `http://localhost:3000/passwords`.
    #[must_use]
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: EntryId) -> String {
        format!("{}/{id}", self.collection_url)
    }

    /// Send a request once and return the body of a 2xx response.
    ///
    /// A 404 is reported as `NotFound` when the request targets a single
    /// entry (`id` is `Some`); every other non-2xx status becomes `Api`.
    async fn send(&self, req: RequestBuilder, id: Option<EntryId>) -> Result<String, ClientError> {
        let resp = req.send().await.map_err(|e| {
            warn!(error = %e, "request failed");
            ClientError::from_reqwest(e)
        })?;

        let status = resp.status();
        if status.is_success() {
            return resp.text().await.map_err(|e| {
                warn!(error = %e, "reading response body failed");
                ClientError::from_reqwest(e)
            });
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(ClientError::NotFound { id });
            }
        }

        let error_text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&error_text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        warn!(status = status.as_u16(), %message, "backend rejected request");
        Err(ClientError::Api {
            status_code: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PasswordRepository for HttpRepository {
    async fn list_all(&self) -> Result<Vec<Entry>, ClientError> {
        debug!(url = %self.collection_url, "listing entries");
        let text = self
            .send(self.client.get(&self.collection_url), None)
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get_one(&self, id: EntryId) -> Result<Entry, ClientError> {
        debug!(id, "fetching entry");
        let text = self.send(self.client.get(self.item_url(id)), Some(id)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn create(&self, draft: &EntryDraft) -> Result<Entry, ClientError> {
        draft.validate()?;
        let body = draft.encode();
        let text = self
            .send(self.client.post(&self.collection_url).json(&body), None)
            .await?;
        let created: Entry = serde_json::from_str(&text)?;
        debug!(id = created.id, "entry created");
        Ok(created)
    }

    async fn update(&self, id: EntryId, draft: &EntryDraft) -> Result<Entry, ClientError> {
        draft.validate()?;
        let entry = draft.encode_with_id(id);
        self.send(self.client.put(self.item_url(id)).json(&entry), Some(id))
            .await?;
        debug!(id, "entry updated");
        Ok(entry)
    }

    async fn delete(&self, id: EntryId) -> Result<(), ClientError> {
        self.send(self.client.delete(self.item_url(id)), Some(id))
            .await?;
        debug!(id, "entry deleted");
        Ok(())
    }
}
