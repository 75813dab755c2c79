//! Crawl settings for the full sync.
//!
//! This module provides the [`CrawlSettings`] type, which bounds how the
//! paginated GitHub listing is walked.
//!
//! # Limits
//!
//! - `per_page` is clamped by GitHub to 100; values outside 1..=100 are rejected.
//! - `timeout_secs` bounds every single page request.
//! - `max_pages` optionally caps the number of pages fetched per listing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default page size (GitHub's maximum).
pub const DEFAULT_PER_PAGE: u8 = 100;

/// Default per-request timeout (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed per-request timeout (5 minutes).
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Public GitHub API root.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Settings for the paginated crawl.
///
/// # Examples
///
/// ```
/// use gitcms_config::CrawlSettings;
///
/// let settings = CrawlSettings::default();
/// assert_eq!(settings.per_page, 100);
/// assert!(settings.max_pages.is_none());
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSettings {
    /// Items requested per page.
    #[serde(default = "default_per_page")]
    pub per_page: u8,

    /// Stop after this many pages, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,

    /// Timeout for each page request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Override of the GitHub API root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

fn default_per_page() -> u8 {
    DEFAULT_PER_PAGE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            max_pages: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_base: None,
        }
    }
}

impl CrawlSettings {
    /// Creates settings that talk to a different API root.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::CrawlSettings;
    ///
    /// let settings = CrawlSettings::with_api_base("http://127.0.0.1:8080");
    /// assert_eq!(settings.api_base(), "http://127.0.0.1:8080");
    /// ```
    #[must_use]
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: Some(api_base.into()),
            ..Default::default()
        }
    }

    /// Returns the API root to use.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(GITHUB_API_BASE)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns whether `pages_fetched` pages exhaust the page budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::CrawlSettings;
    ///
    /// let capped = CrawlSettings { max_pages: Some(2), ..Default::default() };
    /// assert!(!capped.page_budget_exhausted(1));
    /// assert!(capped.page_budget_exhausted(2));
    ///
    /// assert!(!CrawlSettings::default().page_budget_exhausted(1_000));
    /// ```
    #[must_use]
    pub fn page_budget_exhausted(&self, pages_fetched: u32) -> bool {
        self.max_pages.is_some_and(|max| pages_fetched >= max)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `per_page` is outside
    /// 1..=100, `max_pages` is zero, or `timeout_secs` is outside 1..=300.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.per_page) {
            return Err(ConfigError::InvalidOption {
                name: "per_page",
                reason: format!("must be between 1 and 100, got {}", self.per_page),
            });
        }

        if self.max_pages == Some(0) {
            return Err(ConfigError::InvalidOption {
                name: "max_pages",
                reason: "a crawl fetches at least one page".to_string(),
            });
        }

        if !(1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::InvalidOption {
                name: "timeout_secs",
                reason: format!(
                    "must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                    self.timeout_secs
                ),
            });
        }

        Ok(())
    }
}
