//! Cache synchronization service.
//!
//! [`PasswordService`] pairs a [`PasswordRepository`] with an [`EntryCache`]
//! and keeps the cache a projection of the remote operations that have
//! succeeded. The rule is simple: issue the remote call, and only if it
//! succeeds apply exactly one matching cache mutation. A failed call leaves
//! the cache untouched.
//!
//! Methods take `&self`, so several operations can be in flight at once.
//! Nothing orders their completions: when two updates for the same id race,
//! the one whose response arrives last is what the cache ends up holding,
//! regardless of which was issued first. There is no cancellation and no
//! staleness check.

use tokio::sync::watch;
use tracing::{debug, info};

use pwkeep_core::{Entry, EntryCache, EntryDraft, EntryId};

use crate::client::{HttpRepository, PasswordRepository};
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Repository client plus the local cache it keeps in sync.
#[derive(Debug)]
pub struct PasswordService<R = HttpRepository> {
    repo: R,
    cache: EntryCache,
}

impl PasswordService<HttpRepository> {
    /// Build a service backed by the HTTP repository. The cache starts empty;
    /// call [`load_all`](Self::load_all) to populate it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the configuration is invalid.
    pub fn connect(cfg: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(HttpRepository::new(cfg)?))
    }
}

impl<R: PasswordRepository> PasswordService<R> {
    /// Wrap a repository with an empty cache.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            cache: EntryCache::new(),
        }
    }

    /// The local cache, for rendering.
    pub fn cache(&self) -> &EntryCache {
        &self.cache
    }

    /// Subscribe to cache changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Entry>> {
        self.cache.subscribe()
    }

    /// Replace the cache with the full remote collection.
    ///
    /// # Errors
    ///
    /// Returns the repository error; the cache is left as it was.
    pub async fn load_all(&self) -> Result<(), ClientError> {
        let entries = self.repo.list_all().await?;
        info!(count = entries.len(), "loaded password entries");
        self.cache.replace_all(entries);
        Ok(())
    }

    /// Fetch a single entry from the backend. Never touches the cache.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the backend reports no such entry,
    /// or a transport error.
    pub async fn get_one(&self, id: EntryId) -> Result<Entry, ClientError> {
        self.repo.get_one(id).await
    }

    /// Create an entry and append the backend's record to the cache.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for an incomplete draft (no request
    /// is sent), or a transport error. The cache is unchanged on error.
    pub async fn add(&self, draft: &EntryDraft) -> Result<Entry, ClientError> {
        let created = self.repo.create(draft).await?;
        self.cache.append(created.clone());
        Ok(created)
    }

    /// Replace an entry remotely, then mirror the transmitted entry into the
    /// cache. If `id` is not cached the cache is left alone.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation`, `ClientError::NotFound`, or a
    /// transport error. The cache is unchanged on error.
    pub async fn update(&self, id: EntryId, draft: &EntryDraft) -> Result<Entry, ClientError> {
        let sent = self.repo.update(id, draft).await?;
        if !self.cache.replace_one(id, sent.clone()) {
            debug!(id, "updated entry was not cached");
        }
        Ok(sent)
    }

    /// Delete an entry remotely, then drop it from the cache.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` or a transport error. The cache is
    /// unchanged on error.
    pub async fn delete(&self, id: EntryId) -> Result<(), ClientError> {
        self.repo.delete(id).await?;
        self.cache.remove_one(id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;

    fn entry(id: EntryId, password: &str) -> Entry {
        EntryDraft::new("Work", format!("app-{id}"), "alice", password).encode_with_id(id)
    }

    /// Repository whose updates block until the test releases them, so the
    /// order in which responses resolve can be chosen independently of the
    /// order in which requests were issued.
    #[derive(Default)]
    struct GatedRepo {
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
        fail_all: bool,
    }

    impl GatedRepo {
        fn gate(&self, password: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(password.to_owned(), rx);
            tx
        }

        fn failing() -> Self {
            Self {
                fail_all: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), ClientError> {
            if self.fail_all {
                return Err(ClientError::Api {
                    status_code: 503,
                    message: "HTTP 503".to_owned(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PasswordRepository for GatedRepo {
        async fn list_all(&self) -> Result<Vec<Entry>, ClientError> {
            self.check()?;
            Ok(vec![entry(1, "a"), entry(2, "b"), entry(3, "c")])
        }

        async fn get_one(&self, id: EntryId) -> Result<Entry, ClientError> {
            self.check()?;
            Err(ClientError::NotFound { id })
        }

        async fn create(&self, draft: &EntryDraft) -> Result<Entry, ClientError> {
            self.check()?;
            Ok(draft.encode().with_id(100))
        }

        async fn update(&self, id: EntryId, draft: &EntryDraft) -> Result<Entry, ClientError> {
            self.check()?;
            let gate = self.gates.lock().unwrap().remove(&draft.password);
            if let Some(gate) = gate {
                gate.await.expect("gate sender dropped");
            }
            Ok(draft.encode_with_id(id))
        }

        async fn delete(&self, _id: EntryId) -> Result<(), ClientError> {
            self.check()
        }
    }

    fn draft(password: &str) -> EntryDraft {
        EntryDraft::new("Work", "app-2", "alice", password)
    }

    #[tokio::test]
    async fn load_all_populates_cache() {
        let svc = PasswordService::new(GatedRepo::default());
        svc.load_all().await.unwrap();
        assert_eq!(svc.cache().ids(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn get_one_leaves_cache_alone() {
        let svc = PasswordService::new(GatedRepo::default());
        svc.load_all().await.unwrap();
        let rx = svc.subscribe();
        let err = svc.get_one(2).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn failures_leave_cache_unchanged() {
        let svc = PasswordService::new(GatedRepo::failing());
        svc.cache().replace_all(vec![entry(1, "a"), entry(2, "b")]);
        let before = svc.cache().snapshot();
        let rx = svc.subscribe();

        assert!(svc.load_all().await.unwrap_err().is_transport());
        assert!(svc.add(&draft("x")).await.is_err());
        assert!(svc.update(2, &draft("x")).await.is_err());
        assert!(svc.delete(1).await.is_err());

        assert_eq!(svc.cache().snapshot(), before);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn add_appends_after_success() {
        let svc = PasswordService::new(GatedRepo::default());
        svc.load_all().await.unwrap();
        let created = svc.add(&draft("new")).await.unwrap();
        assert_eq!(created.id, 100);
        assert_eq!(svc.cache().ids(), vec![1, 2, 3, 100]);
    }

    #[tokio::test]
    async fn delete_of_uncached_id_still_notifies() {
        let svc = PasswordService::new(GatedRepo::default());
        svc.load_all().await.unwrap();
        let mut rx = svc.subscribe();

        svc.delete(50).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn update_of_uncached_id_is_not_inserted() {
        let svc = PasswordService::new(GatedRepo::default());
        svc.load_all().await.unwrap();
        svc.update(50, &draft("x")).await.unwrap();
        assert_eq!(svc.cache().ids(), vec![1, 2, 3]);
    }

    // Documents a known hazard rather than endorsing it: the response that
    // resolves last wins, even though "first" was issued first and "second"
    // was issued last.
    #[tokio::test]
    async fn racing_updates_last_response_wins() {
        let repo = GatedRepo::default();
        let release_first = repo.gate("first");
        let release_second = repo.gate("second");
        let svc = PasswordService::new(repo);
        svc.load_all().await.unwrap();

        let mut rx = svc.subscribe();
        let first_draft = draft("first");
        let second_draft = draft("second");
        let first = svc.update(2, &first_draft);
        let second = svc.update(2, &second_draft);

        // Both requests are in flight before either is answered; the second
        // one is answered (and applied) before the first.
        let release = async {
            tokio::task::yield_now().await;
            release_second.send(()).unwrap();
            rx.changed().await.unwrap();
            release_first.send(()).unwrap();
        };

        let (a, b, ()) = tokio::join!(first, second, release);
        a.unwrap();
        b.unwrap();

        let cached = svc.cache().get(2).unwrap();
        assert_eq!(cached.decoded_password().unwrap(), "first");
        assert_eq!(svc.cache().ids(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn racing_updates_in_issue_order() {
        let repo = GatedRepo::default();
        let release_first = repo.gate("first");
        let release_second = repo.gate("second");
        let svc = PasswordService::new(repo);
        svc.load_all().await.unwrap();

        let mut rx = svc.subscribe();
        let first_draft = draft("first");
        let second_draft = draft("second");
        let release = async {
            tokio::task::yield_now().await;
            release_first.send(()).unwrap();
            rx.changed().await.unwrap();
            release_second.send(()).unwrap();
        };

        let (a, b, ()) = tokio::join!(
            svc.update(2, &first_draft),
            svc.update(2, &second_draft),
            release
        );
        a.unwrap();
        b.unwrap();

        let cached = svc.cache().get(2).unwrap();
        assert_eq!(cached.decoded_password().unwrap(), "second");
    }
}
