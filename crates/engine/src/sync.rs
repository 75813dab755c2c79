//! Full-sync bootstrap.
//!
//! [`Bootstrapper::sync`] crawls a repository's issues and labels into the
//! store at most once per process. Concurrent first calls for the same
//! repository share one crawl; a failed crawl leaves the store untouched
//! and the next call starts over.
//!
//! The repository's entry stays locked while its first crawl runs.
//! Webhook deliveries arriving meanwhile wait, then apply on top of the
//! crawl result instead of being overwritten by it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, instrument, warn};

use gitcms_config::{Config, CrawlSettings, RepoOptions};
use gitcms_github::GitHubClient;
use gitcms_protocol::Projection;

use crate::error::{Result, SyncError};
use crate::store::{RepoEntry, Store};

/// What a call to [`Bootstrapper::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// This call ran the crawl and installed its result.
    Crawled,
    /// The repository was already synced, or another call synced it while
    /// this one waited.
    AlreadySynced,
}

/// Runs the one-time full crawl of each repository.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    store: Arc<Store>,
    crawl: CrawlSettings,
}

impl Bootstrapper {
    /// Creates a bootstrapper writing into `store`.
    #[must_use]
    pub fn new(store: Arc<Store>, crawl: CrawlSettings) -> Self {
        Self { store, crawl }
    }

    /// Returns the store this bootstrapper writes into.
    #[must_use]
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Syncs the repository described by `options`.
    ///
    /// Issues and labels are fetched concurrently and installed together,
    /// replacing whatever webhooks recorded before the crawl started.
    /// Deliveries received during the crawl are applied after it. Once a
    /// sync has succeeded, later calls return without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Config`](crate::SyncError::Config) if `options`
    /// do not resolve, and [`SyncError::GitHub`](crate::SyncError::GitHub)
    /// if any page of the crawl fails.
    #[instrument(skip(self, options), fields(repo = %options.repo))]
    pub async fn sync(&self, options: &RepoOptions) -> Result<SyncOutcome> {
        let config = Config::resolve(options)?;
        let slot = self.store.slot(&config.repo_id()).await;

        let crawled = AtomicBool::new(false);
        let (config_ref, crawl, entry, crawled_ref) = (&config, &self.crawl, &slot.entry, &crawled);
        slot.synced
            .get_or_try_init(|| async move {
                let mut guard = entry.lock().await;
                let projection = full_crawl(config_ref, crawl).await?;
                info!(
                    posts = projection.post_count(),
                    labels = projection.label_count(),
                    "full sync complete"
                );
                *guard = Some(RepoEntry {
                    config: config_ref.clone(),
                    projection,
                });
                crawled_ref.store(true, Ordering::Release);
                Ok::<(), SyncError>(())
            })
            .await
            .inspect_err(|err| warn!(error = %err, "full sync failed"))?;

        if crawled.load(Ordering::Acquire) {
            Ok(SyncOutcome::Crawled)
        } else {
            debug!("already synced");
            Ok(SyncOutcome::AlreadySynced)
        }
    }
}

/// Crawls issues and labels into a fresh projection.
async fn full_crawl(config: &Config, crawl: &CrawlSettings) -> Result<Projection> {
    let client = GitHubClient::new(config.auth_token.clone(), crawl).await?;
    let (posts, labels) = tokio::try_join!(client.fetch_posts(config), client.fetch_labels(config))?;

    let mut projection = Projection::new();
    for post in posts {
        projection.upsert_post(post);
    }
    for (id, label) in labels {
        projection.upsert_label(id, label);
    }
    Ok(projection)
}
