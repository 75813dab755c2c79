//! Configuration for gitcms.
//!
//! This crate turns loosely specified repository options into the resolved
//! configuration the sync engine works with, and loads server settings from
//! files and environment variables.
//!
//! # Overview
//!
//! - [`repository`]: `"owner/name"` identifiers
//! - [`options`]: raw per-repository options ([`RepoOptions`])
//! - [`config`]: the resolved [`Config`] and its label predicates
//! - [`crawl`]: page size, page cap, and timeout for the full sync
//! - [`settings`]: server-level [`Settings`]
//! - [`auth`]: token fallback chain
//! - [`persistence`]: settings file discovery and reading
//! - [`error`]: error types
//!
//! # Defaults
//!
//! | Option | Default |
//! |--------|---------|
//! | `label_prefix` | `""` (every label is a tag) |
//! | `label_published` | `""` (every issue is published) |
//! | `allowed_authors` | the comma-separated owner segment of the repository |
//! | `slug_suffix_with_issue_number` | `true` |
//!
//! # Examples
//!
//! ```
//! use gitcms_config::{Config, RepoOptions};
//!
//! let options = RepoOptions {
//!     label_prefix: Some("+".to_string()),
//!     label_published: Some("+page".to_string()),
//!     ..RepoOptions::for_repo("ak4zh/blog")
//! };
//! let config = Config::resolve(&options)?;
//! assert_eq!(config.tag_name("+rust"), "rust");
//! # Ok::<(), gitcms_config::ConfigError>(())
//! ```

pub mod auth;
pub mod config;
pub mod crawl;
pub mod error;
pub mod options;
pub mod persistence;
pub mod repository;
pub mod settings;

pub use config::Config;
pub use crawl::CrawlSettings;
pub use error::{ConfigError, Result};
pub use options::RepoOptions;
pub use repository::Repository;
pub use settings::Settings;
