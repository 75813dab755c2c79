//! GitHub API client for gitcms.
//!
//! This crate performs the full crawl of a repository: every published
//! issue becomes a [`Post`](gitcms_protocol::Post) and every tag label a
//! [`PostLabel`](gitcms_protocol::PostLabel).
//!
//! # Overview
//!
//! - [`GitHubClient`]: the API client with optional authentication
//! - [`crawl`]: `Link`-header pagination with a page budget
//! - [`issue`]: [`parse_post`] and [`GitHubClient::fetch_posts`]
//! - [`label`]: [`parse_label`] and [`GitHubClient::fetch_labels`]
//! - [`Error`]: error types for GitHub API operations
//!
//! # Authentication
//!
//! - **Authenticated**: 5,000 requests/hour, access to private repos
//! - **Unauthenticated**: 60 requests/hour, public repos only
//!
//! # Examples
//!
//! ```no_run
//! use gitcms_config::{Config, CrawlSettings, RepoOptions};
//! use gitcms_github::GitHubClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::resolve(&RepoOptions::for_repo("ak4zh/blog"))?;
//! let client = GitHubClient::new(config.auth_token.clone(), &CrawlSettings::default()).await?;
//!
//! let posts = client.fetch_posts(&config).await?;
//! let labels = client.fetch_labels(&config).await?;
//! println!("{} posts, {} tags", posts.len(), labels.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod crawl;
pub mod error;
pub mod issue;
pub mod label;

pub use client::GitHubClient;
pub use crawl::CrawlSummary;
pub use error::{Error, Result};
pub use issue::{IssueQuery, is_publishable, parse_post};
pub use label::parse_label;
