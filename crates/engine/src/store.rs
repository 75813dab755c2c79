//! The repository store.
//!
//! The [`Store`] maps a repository id to its configuration and projection.
//! Each repository lives in its own slot: the map lock is only held long
//! enough to find or create a slot, and every slot serializes its own
//! writers, so work on one repository never blocks another.
//!
//! Repository ids are matched ignoring ASCII case, as GitHub does: a
//! webhook naming `Ak4zh/Blog` reaches the entry synced as `ak4zh/blog`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell, RwLock};

use gitcms_config::Config;
use gitcms_protocol::{CmsData, Projection};

/// Configuration and projection of one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub config: Config,
    pub projection: Projection,
}

/// Per-repository state.
#[derive(Debug, Default)]
pub(crate) struct RepoSlot {
    /// Set once the full crawl has completed.
    pub(crate) synced: OnceCell<()>,
    /// Absent until a crawl completes or a webhook arrives.
    pub(crate) entry: Mutex<Option<RepoEntry>>,
}

/// In-memory mapping from repository id to [`RepoEntry`].
///
/// The store is owned by the process and shared through an [`Arc`]; it is
/// never persisted.
///
/// # Examples
///
/// ```
/// use gitcms_engine::Store;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = Store::new();
/// assert!(store.get_projection("ak4zh/blog").await.is_none());
/// assert!(!store.is_synced("ak4zh/blog").await);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Store {
    slots: RwLock<HashMap<String, Arc<RepoSlot>>>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot for `repo_id`, creating it if needed.
    pub(crate) async fn slot(&self, repo_id: &str) -> Arc<RepoSlot> {
        if let Some(slot) = self.existing_slot(repo_id).await {
            return slot;
        }
        let mut slots = self.slots.write().await;
        Arc::clone(slots.entry(slot_key(repo_id)).or_default())
    }

    async fn existing_slot(&self, repo_id: &str) -> Option<Arc<RepoSlot>> {
        self.slots.read().await.get(&slot_key(repo_id)).cloned()
    }

    /// Returns a copy of the entry for `repo_id`.
    pub async fn get_entry(&self, repo_id: &str) -> Option<RepoEntry> {
        let slot = self.existing_slot(repo_id).await?;
        let entry = slot.entry.lock().await;
        entry.clone()
    }

    /// Returns a copy of the projection for `repo_id`.
    pub async fn get_projection(&self, repo_id: &str) -> Option<Projection> {
        self.get_entry(repo_id).await.map(|entry| entry.projection)
    }

    /// Returns the configuration `repo_id` was synced or reconciled with.
    pub async fn get_config(&self, repo_id: &str) -> Option<Config> {
        self.get_entry(repo_id).await.map(|entry| entry.config)
    }

    /// Returns the sorted posts and labels of `repo_id`.
    pub async fn cms_data(&self, repo_id: &str) -> Option<CmsData> {
        let slot = self.existing_slot(repo_id).await?;
        let entry = slot.entry.lock().await;
        entry.as_ref().map(|entry| entry.projection.to_cms_data())
    }

    /// Returns whether the full crawl of `repo_id` has completed.
    pub async fn is_synced(&self, repo_id: &str) -> bool {
        match self.existing_slot(repo_id).await {
            Some(slot) => slot.synced.initialized(),
            None => false,
        }
    }

    /// Returns the ids of every repository with an entry, sorted.
    ///
    /// Ids are spelled as in the entry's configuration.
    pub async fn repositories(&self) -> Vec<String> {
        let slots: Vec<_> = self.slots.read().await.values().cloned().collect();

        let mut ids = Vec::new();
        for slot in slots {
            if let Some(entry) = slot.entry.lock().await.as_ref() {
                ids.push(entry.config.repo_id());
            }
        }
        ids.sort();
        ids
    }
}

fn slot_key(repo_id: &str) -> String {
    repo_id.to_ascii_lowercase()
}
