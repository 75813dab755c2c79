//! Raw, unvalidated per-repository options.
//!
//! [`RepoOptions`] is what an operator writes down: every field but the
//! repository is optional. It is turned into a [`Config`](crate::Config)
//! by [`Config::resolve`](crate::Config::resolve).

use serde::{Deserialize, Serialize};

use crate::auth::resolve_token;
use crate::error::{ConfigError, Result};

/// Environment variable holding the repository identifier.
pub const ENV_REPO: &str = "GITHUB_REPO";
/// Environment variable holding the tag label prefix.
pub const ENV_LABEL_PREFIX: &str = "GITHUB_LABEL_PREFIX";
/// Environment variable holding the published label name.
pub const ENV_LABEL_PUBLISHED: &str = "GITHUB_LABEL_PUBLISHED";
/// Environment variable holding the comma-separated author allow-list.
pub const ENV_ALLOWED_AUTHORS: &str = "GITHUB_ALLOWED_AUTHORS";
/// Environment variable toggling the issue-number slug suffix.
pub const ENV_SLUG_SUFFIX: &str = "SLUG_SUFFIX_ISSUE_NUMBER";

/// Raw options for one repository.
///
/// # Examples
///
/// ```
/// use gitcms_config::RepoOptions;
///
/// let options: RepoOptions = serde_json::from_str(
///     r#"{ "repo": "ak4zh/blog", "label_published": "+page" }"#,
/// ).unwrap();
/// assert_eq!(options.repo, "ak4zh/blog");
/// assert_eq!(options.label_published.as_deref(), Some("+page"));
/// assert!(options.label_prefix.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoOptions {
    /// Repository identifier, `"owner/name"`.
    pub repo: String,

    /// Prefix every tag label must start with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_prefix: Option<String>,

    /// Label gating publication. Empty means every issue is published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_published: Option<String>,

    /// Comma-separated list of users whose issues become posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_authors: Option<String>,

    /// Whether slugs end with `-{issue number}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_suffix_with_issue_number: Option<bool>,

    /// GitHub access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl RepoOptions {
    /// Creates options for a repository, with every other field unset.
    #[must_use]
    pub fn for_repo(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            ..Default::default()
        }
    }

    /// Reads options from environment variables through `lookup`.
    ///
    /// Returns `Ok(None)` when `GITHUB_REPO` is unset or blank. The token is
    /// resolved through [`resolve_token`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `SLUG_SUFFIX_ISSUE_NUMBER`
    /// is not a recognizable boolean.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::RepoOptions;
    ///
    /// let options = RepoOptions::from_lookup(|key| match key {
    ///     "GITHUB_REPO" => Some("ak4zh/blog".to_string()),
    ///     "SLUG_SUFFIX_ISSUE_NUMBER" => Some("false".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap()
    /// .unwrap();
    /// assert_eq!(options.slug_suffix_with_issue_number, Some(false));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(repo) = lookup(ENV_REPO).filter(|r| !r.trim().is_empty()) else {
            return Ok(None);
        };

        let slug_suffix_with_issue_number = lookup(ENV_SLUG_SUFFIX)
            .map(|raw| parse_bool(ENV_SLUG_SUFFIX, &raw))
            .transpose()?
            .flatten();

        Ok(Some(Self {
            repo,
            label_prefix: lookup(ENV_LABEL_PREFIX),
            label_published: lookup(ENV_LABEL_PUBLISHED),
            allowed_authors: lookup(ENV_ALLOWED_AUTHORS),
            slug_suffix_with_issue_number,
            auth_token: resolve_token(None, &lookup),
        }))
    }

    /// Reads options from the process environment.
    ///
    /// # Errors
    ///
    /// See [`RepoOptions::from_lookup`].
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Parses a boolean flag; blank means "unset".
fn parse_bool(name: &'static str, raw: &str) -> Result<Option<bool>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        other => Err(ConfigError::InvalidOption {
            name,
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn from_lookup_without_repo_is_none() {
        let options = RepoOptions::from_lookup(lookup_from(&[("GITHUB_LABEL_PREFIX", "+")]))
            .unwrap();
        assert!(options.is_none());
    }

    #[test]
    fn from_lookup_reads_every_field() {
        let options = RepoOptions::from_lookup(lookup_from(&[
            ("GITHUB_REPO", "ak4zh/blog"),
            ("GITHUB_LABEL_PREFIX", "+"),
            ("GITHUB_LABEL_PUBLISHED", "+page"),
            ("GITHUB_ALLOWED_AUTHORS", "ak4zh,guest"),
            ("SLUG_SUFFIX_ISSUE_NUMBER", "yes"),
            ("GH_TOKEN", "ghp_env"),
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(options.repo, "ak4zh/blog");
        assert_eq!(options.label_prefix.as_deref(), Some("+"));
        assert_eq!(options.label_published.as_deref(), Some("+page"));
        assert_eq!(options.allowed_authors.as_deref(), Some("ak4zh,guest"));
        assert_eq!(options.slug_suffix_with_issue_number, Some(true));
        assert_eq!(options.auth_token.as_deref(), Some("ghp_env"));
    }

    #[test]
    fn from_lookup_rejects_bad_boolean() {
        let result = RepoOptions::from_lookup(lookup_from(&[
            ("GITHUB_REPO", "ak4zh/blog"),
            ("SLUG_SUFFIX_ISSUE_NUMBER", "maybe"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOption { name: ENV_SLUG_SUFFIX, .. })
        ));
    }

    #[test]
    fn blank_boolean_is_unset() {
        assert_eq!(parse_bool(ENV_SLUG_SUFFIX, "  ").unwrap(), None);
        assert_eq!(parse_bool(ENV_SLUG_SUFFIX, "FALSE").unwrap(), Some(false));
        assert_eq!(parse_bool(ENV_SLUG_SUFFIX, "1").unwrap(), Some(true));
    }

    #[test]
    fn deserialize_minimal() {
        let options: RepoOptions = serde_json::from_str(r#"{"repo": "o/r"}"#).unwrap();
        assert_eq!(options, RepoOptions::for_repo("o/r"));
    }
}
