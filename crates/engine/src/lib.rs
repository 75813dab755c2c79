//! Sync engine for gitcms.
//!
//! The engine keeps an in-memory projection of each repository current:
//!
//! - [`Bootstrapper`]: the one-time full crawl of a repository
//! - [`Reconciler`]: applies webhook deliveries as incremental changes
//! - [`Store`]: the shared map from repository id to its projection
//!
//! Both writers receive the store explicitly and lock one repository at a
//! time, so deliveries for different repositories never wait on each other.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gitcms_config::{CrawlSettings, RepoOptions};
//! use gitcms_engine::{Bootstrapper, Reconciler, Store, Tenancy};
//!
//! # async fn example() -> gitcms_engine::Result<()> {
//! let store = Arc::new(Store::new());
//! let bootstrapper = Bootstrapper::new(Arc::clone(&store), CrawlSettings::default());
//! let reconciler = Reconciler::new(Arc::clone(&store), Tenancy::Multi);
//!
//! bootstrapper.sync(&RepoOptions::for_repo("ak4zh/blog")).await?;
//! reconciler.handle(br#"{"zen": "Practicality beats purity."}"#).await;
//!
//! if let Some(data) = store.cms_data("ak4zh/blog").await {
//!     println!("{} posts", data.posts.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod reconcile;
pub mod store;
pub mod sync;

pub use error::{Result, SyncError};
pub use reconcile::{Reconciler, Tenancy, Transition, reconcile};
pub use store::{RepoEntry, Store};
pub use sync::{Bootstrapper, SyncOutcome};
