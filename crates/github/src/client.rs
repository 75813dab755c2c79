//! GitHub API client implementation.
//!
//! This module provides the [`GitHubClient`] struct, configured once per
//! crawl from the repository token and the [`CrawlSettings`].

use http::header::{ACCEPT, AUTHORIZATION};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use gitcms_config::CrawlSettings;

use crate::error::{Error, Result};

/// Media type asking GitHub for markdown, HTML and text bodies at once.
pub const FULL_MEDIA_TYPE: &str = "application/vnd.github.full+json";

/// GitHub API client with optional authentication.
///
/// Authenticated clients have higher rate limits (5,000 req/hour vs 60
/// req/hour) and can read private repositories.
///
/// # Security
///
/// Tokens are handled as [`SecretString`] and never appear in debug output.
///
/// # Examples
///
/// ```no_run
/// use gitcms_config::CrawlSettings;
/// use gitcms_github::GitHubClient;
///
/// # async fn example() -> gitcms_github::Result<()> {
/// let client = GitHubClient::new(None, &CrawlSettings::default()).await?;
/// assert!(!client.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubClient {
    /// The underlying octocrab client.
    inner: Octocrab,
    /// Whether this client is authenticated.
    authenticated: bool,
    /// Paging limits.
    crawl: CrawlSettings,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    ///
    /// Requests ask for the full media type and time out after
    /// [`CrawlSettings::timeout`]. They are never retried. A token is sent
    /// as `Authorization: token ...`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API root is not a valid URI or the octocrab
    /// client fails to initialize.
    #[instrument(skip(token, crawl), fields(authenticated = token.is_some(), api_base = crawl.api_base()))]
    pub async fn new(token: Option<SecretString>, crawl: &CrawlSettings) -> Result<Self> {
        let mut builder = Octocrab::builder()
            .base_uri(crawl.api_base())
            .map_err(Error::Api)?
            .add_header(ACCEPT, FULL_MEDIA_TYPE.to_string())
            .add_retry_config(RetryConfig::None)
            .set_connect_timeout(Some(crawl.timeout()))
            .set_read_timeout(Some(crawl.timeout()));

        let authenticated = token.is_some();
        if let Some(token) = token {
            debug!("creating authenticated GitHub client");
            builder = builder.add_header(AUTHORIZATION, format!("token {}", token.expose_secret()));
        } else {
            debug!("creating unauthenticated GitHub client");
        }

        Ok(Self {
            inner: builder.build().map_err(Error::Api)?,
            authenticated,
            crawl: crawl.clone(),
        })
    }

    /// Returns whether this client is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns the crawl settings this client pages with.
    #[must_use]
    pub fn crawl_settings(&self) -> &CrawlSettings {
        &self.crawl
    }

    /// Returns a reference to the underlying octocrab client.
    #[must_use]
    pub fn inner(&self) -> &Octocrab {
        &self.inner
    }
}
