//! Server-level settings.
//!
//! [`Settings`] aggregates what the HTTP front-end needs: where to listen,
//! which repositories to serve, and how to crawl them.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::crawl::CrawlSettings;
use crate::error::Result;
use crate::options::RepoOptions;
use crate::persistence::{find_config_file, read_config_file};

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";

/// Settings for a gitcms server.
///
/// # Examples
///
/// ```
/// use gitcms_config::Settings;
///
/// let settings: Settings = serde_json::from_str(r#"{
///     "repositories": [{ "repo": "ak4zh/blog", "label_published": "+page" }],
///     "crawl": { "max_pages": 5 }
/// }"#).unwrap();
/// assert_eq!(settings.listen, "0.0.0.0:3000");
/// assert_eq!(settings.repositories.len(), 1);
/// assert_eq!(settings.crawl.max_pages, Some(5));
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Repositories served by this instance.
    #[serde(default)]
    pub repositories: Vec<RepoOptions>,

    /// Crawl settings shared by every repository.
    #[serde(default)]
    pub crawl: CrawlSettings,

    /// Only accept webhooks for the first configured repository.
    #[serde(default)]
    pub single_tenant: bool,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            repositories: Vec::new(),
            crawl: CrawlSettings::default(),
            single_tenant: false,
        }
    }
}

impl Settings {
    /// Loads settings from the default file locations, then the environment.
    ///
    /// A repository described by `GITHUB_REPO` and friends is added unless
    /// the file already lists it.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or
    /// parsed, or if the resulting settings are invalid.
    pub fn load() -> Result<Self> {
        let settings = match find_config_file() {
            Some(path) => read_config_file(&path)?,
            None => Self::default(),
        };
        settings.with_env_repository(|key| std::env::var(key).ok())
    }

    /// Loads settings from a specific file, then validates them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let settings: Settings = read_config_file(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Adds the repository described by environment variables, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds invalid options, or if the
    /// resulting settings are invalid.
    pub fn with_env_repository<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(options) = RepoOptions::from_lookup(lookup)? {
            if self.repository(&options.repo).is_none() {
                self.repositories.push(options);
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Validates crawl settings and every repository's options.
    ///
    /// # Errors
    ///
    /// Returns the first error found.
    pub fn validate(&self) -> Result<()> {
        self.crawl.validate()?;
        for options in &self.repositories {
            Config::resolve(options)?;
        }
        Ok(())
    }

    /// Returns the configured options for `repo_id`, if any.
    ///
    /// Repository ids are compared ignoring ASCII case.
    #[must_use]
    pub fn repository(&self, repo_id: &str) -> Option<&RepoOptions> {
        self.repositories
            .iter()
            .find(|r| r.repo.eq_ignore_ascii_case(repo_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use tempfile::TempDir;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.listen, DEFAULT_LISTEN);
        assert!(settings.repositories.is_empty());
        assert!(!settings.single_tenant);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn load_from_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitcms.json5");
        std::fs::write(
            &path,
            r#"
            {
                listen: "127.0.0.1:8080",
                repositories: [
                    { repo: "ak4zh/blog", label_prefix: "+", label_published: "+page" },
                    { repo: "org/docs" },
                ],
                crawl: { timeout_secs: 10 },
            }
            "#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.listen, "127.0.0.1:8080");
        assert_eq!(settings.repositories.len(), 2);
        assert_eq!(
            settings.repository("ak4zh/blog").and_then(|r| r.label_published.as_deref()),
            Some("+page")
        );
        assert_eq!(settings.crawl.timeout_secs, 10);
    }

    #[test]
    fn load_from_rejects_malformed_repository() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitcms.json");
        std::fs::write(&path, r#"{"repositories": [{"repo": "missing-separator"}]}"#).unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::InvalidRepository(_))
        ));
    }

    #[test]
    fn env_repository_is_appended_once() {
        let lookup = |key: &str| (key == "GITHUB_REPO").then(|| "ak4zh/blog".to_string());

        let settings = Settings::default().with_env_repository(lookup).unwrap();
        assert_eq!(settings.repositories.len(), 1);

        let settings = settings.with_env_repository(lookup).unwrap();
        assert_eq!(settings.repositories.len(), 1);
    }

    #[test]
    fn repository_lookup_ignores_case() {
        let settings = Settings {
            repositories: vec![RepoOptions::for_repo("ak4zh/blog")],
            ..Default::default()
        };
        assert!(settings.repository("Ak4zh/Blog").is_some());

        let lookup = |key: &str| (key == "GITHUB_REPO").then(|| "AK4ZH/blog".to_string());
        let settings = settings.with_env_repository(lookup).unwrap();
        assert_eq!(settings.repositories.len(), 1);
    }

    #[test]
    fn env_without_repository_changes_nothing() {
        let settings = Settings::default().with_env_repository(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
