//! Resolved per-repository configuration.
//!
//! This module provides the [`Config`] struct, the fully-populated form of
//! [`RepoOptions`], along with the label predicates every other component
//! uses to decide what counts as a tag or as the published marker.

use std::collections::BTreeSet;

use secrecy::{ExposeSecret, SecretString};

use crate::error::Result;
use crate::options::RepoOptions;
use crate::repository::Repository;

/// Default tag label prefix (no prefix: every label is a tag).
pub const DEFAULT_LABEL_PREFIX: &str = "";

/// Default published label (no gate: every issue is published).
pub const DEFAULT_LABEL_PUBLISHED: &str = "";

/// Default slug suffix policy.
pub const DEFAULT_SLUG_SUFFIX_WITH_ISSUE_NUMBER: bool = true;

/// The configuration of one repository used as a content backend.
///
/// # Examples
///
/// ```
/// use gitcms_config::{Config, RepoOptions};
///
/// let config = Config::resolve(&RepoOptions::for_repo("ak4zh/blog")).unwrap();
/// assert_eq!(config.repo_id(), "ak4zh/blog");
/// assert_eq!(config.label_prefix, "");
/// assert!(config.slug_suffix_with_issue_number);
/// assert!(config.is_allowed_author("ak4zh"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// The repository.
    pub repository: Repository,

    /// Prefix every tag label must start with. May be empty.
    pub label_prefix: String,

    /// Label gating publication. Empty disables gating.
    pub label_published: String,

    /// Users whose issues may become posts.
    pub allowed_authors: BTreeSet<String>,

    /// Whether derived slugs end with `-{issue number}`.
    pub slug_suffix_with_issue_number: bool,

    /// GitHub access token.
    pub auth_token: Option<SecretString>,
}

impl Config {
    /// Resolves raw options into a configuration.
    ///
    /// This is a pure function: resolving the same options twice yields
    /// equal configurations. When `allowed_authors` is absent or lists
    /// nobody, the comma-separated owner segment of the repository is used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`](crate::ConfigError::InvalidRepository)
    /// if `repo` is not in `"owner/name"` form.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::{Config, RepoOptions};
    ///
    /// let options = RepoOptions {
    ///     allowed_authors: Some("alice, bob".to_string()),
    ///     label_published: Some("+page".to_string()),
    ///     ..RepoOptions::for_repo("org/site")
    /// };
    /// let config = Config::resolve(&options).unwrap();
    /// assert!(config.is_allowed_author("bob"));
    /// assert!(!config.is_allowed_author("org"));
    /// assert!(config.is_published_gated());
    /// ```
    pub fn resolve(options: &RepoOptions) -> Result<Self> {
        let repository = Repository::parse_short(&options.repo)?;

        let mut allowed_authors: BTreeSet<String> = options
            .allowed_authors
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|login| !login.is_empty())
            .map(str::to_string)
            .collect();
        if allowed_authors.is_empty() {
            allowed_authors = repository.owner_logins().map(str::to_string).collect();
        }

        let auth_token = options
            .auth_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.to_string()));

        Ok(Self {
            repository,
            label_prefix: options
                .label_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_LABEL_PREFIX.to_string()),
            label_published: options
                .label_published
                .clone()
                .unwrap_or_else(|| DEFAULT_LABEL_PUBLISHED.to_string()),
            allowed_authors,
            slug_suffix_with_issue_number: options
                .slug_suffix_with_issue_number
                .unwrap_or(DEFAULT_SLUG_SUFFIX_WITH_ISSUE_NUMBER),
            auth_token,
        })
    }

    /// Returns the configuration used for a repository nobody configured.
    ///
    /// # Errors
    ///
    /// Returns an error if `repo_id` is not in `"owner/name"` form.
    pub fn defaults_for(repo_id: &str) -> Result<Self> {
        Self::resolve(&RepoOptions::for_repo(repo_id))
    }

    /// Returns the `"owner/name"` identifier of the repository.
    #[must_use]
    pub fn repo_id(&self) -> String {
        self.repository.full_name()
    }

    /// Returns whether a published label gates visibility.
    #[must_use]
    pub fn is_published_gated(&self) -> bool {
        !self.label_published.is_empty()
    }

    /// Returns whether `name` is the published marker label.
    #[must_use]
    pub fn is_published_marker(&self, name: &str) -> bool {
        self.is_published_gated() && name == self.label_published
    }

    /// Returns whether a label with this name is exposed as a tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::{Config, RepoOptions};
    ///
    /// let config = Config::resolve(&RepoOptions {
    ///     label_prefix: Some("+".to_string()),
    ///     label_published: Some("+page".to_string()),
    ///     ..RepoOptions::for_repo("o/r")
    /// }).unwrap();
    /// assert!(config.is_tag_label("+rust"));
    /// assert!(!config.is_tag_label("+page"));
    /// assert!(!config.is_tag_label("bug"));
    /// ```
    #[must_use]
    pub fn is_tag_label(&self, name: &str) -> bool {
        !self.is_published_marker(name) && name.starts_with(&self.label_prefix)
    }

    /// Strips the configured prefix from a label name.
    ///
    /// Names that do not carry the prefix are returned unchanged.
    #[must_use]
    pub fn tag_name<'a>(&self, label: &'a str) -> &'a str {
        label.strip_prefix(self.label_prefix.as_str()).unwrap_or(label)
    }

    /// Returns whether `login` may author posts.
    #[must_use]
    pub fn is_allowed_author(&self, login: &str) -> bool {
        self.allowed_authors.contains(login)
    }

    /// Returns the single allowed author, if there is exactly one.
    ///
    /// Used to filter the issue listing server-side.
    #[must_use]
    pub fn sole_author(&self) -> Option<&str> {
        match self.allowed_authors.len() {
            1 => self.allowed_authors.first().map(String::as_str),
            _ => None,
        }
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.repository == other.repository
            && self.label_prefix == other.label_prefix
            && self.label_published == other.label_published
            && self.allowed_authors == other.allowed_authors
            && self.slug_suffix_with_issue_number == other.slug_suffix_with_issue_number
            && self.auth_token.as_ref().map(|t| t.expose_secret())
                == other.auth_token.as_ref().map(|t| t.expose_secret())
    }
}

impl Eq for Config {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    fn gated() -> Config {
        Config::resolve(&RepoOptions {
            label_prefix: Some("+".to_string()),
            label_published: Some("+page".to_string()),
            ..RepoOptions::for_repo("ak4zh/blog")
        })
        .unwrap()
    }

    #[test]
    fn resolve_applies_defaults() {
        let config = Config::resolve(&RepoOptions::for_repo("ak4zh/blog")).unwrap();
        assert_eq!(config.label_prefix, "");
        assert_eq!(config.label_published, "");
        assert!(config.slug_suffix_with_issue_number);
        assert!(config.auth_token.is_none());
        assert_eq!(
            config.allowed_authors,
            BTreeSet::from(["ak4zh".to_string()])
        );
    }

    #[test]
    fn resolve_derives_authors_from_comma_owner() {
        let config = Config::resolve(&RepoOptions {
            allowed_authors: Some(" , ".to_string()),
            ..RepoOptions::for_repo("alice,bob/blog")
        })
        .unwrap();
        assert!(config.is_allowed_author("alice"));
        assert!(config.is_allowed_author("bob"));
        assert_eq!(config.sole_author(), None);
    }

    #[test]
    fn resolve_prefers_explicit_authors() {
        let config = Config::resolve(&RepoOptions {
            allowed_authors: Some("carol".to_string()),
            ..RepoOptions::for_repo("ak4zh/blog")
        })
        .unwrap();
        assert!(!config.is_allowed_author("ak4zh"));
        assert_eq!(config.sole_author(), Some("carol"));
    }

    #[test]
    fn resolve_is_idempotent() {
        let options = RepoOptions {
            label_prefix: Some("+".to_string()),
            label_published: Some("+page".to_string()),
            allowed_authors: Some("b,a".to_string()),
            slug_suffix_with_issue_number: Some(false),
            auth_token: Some("ghp_xxx".to_string()),
            ..RepoOptions::for_repo("o/r")
        };
        assert_eq!(
            Config::resolve(&options).unwrap(),
            Config::resolve(&options).unwrap()
        );
    }

    #[test]
    fn resolve_rejects_malformed_repo() {
        assert!(matches!(
            Config::resolve(&RepoOptions::for_repo("no-separator")),
            Err(ConfigError::InvalidRepository(_))
        ));
    }

    #[test]
    fn blank_token_is_dropped() {
        let config = Config::resolve(&RepoOptions {
            auth_token: Some("   ".to_string()),
            ..RepoOptions::for_repo("o/r")
        })
        .unwrap();
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn tag_label_predicates() {
        let config = gated();
        assert!(config.is_published_marker("+page"));
        assert!(config.is_tag_label("+tech"));
        assert!(!config.is_tag_label("+page"));
        assert!(!config.is_tag_label("tech"));
        assert_eq!(config.tag_name("+tech"), "tech");
        assert_eq!(config.tag_name("tech"), "tech");
    }

    #[test]
    fn ungated_config_treats_every_label_as_tag() {
        let config = Config::defaults_for("o/r").unwrap();
        assert!(!config.is_published_gated());
        assert!(!config.is_published_marker(""));
        assert!(config.is_tag_label("anything"));
        assert_eq!(config.tag_name("anything"), "anything");
    }
}
