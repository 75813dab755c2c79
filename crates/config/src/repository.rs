//! Repository identifiers.
//!
//! This module provides the [`Repository`] type, which accepts two formats:
//!
//! - Short format: `"owner/repo"` string
//! - Full format: `{ "owner": "...", "repo": "..." }` object
//!
//! The owner segment may itself be a comma-joined list of users. GitHub never
//! sees that list; it only serves as the default allow-list of post authors.
//!
//! # Examples
//!
//! ```
//! use gitcms_config::Repository;
//!
//! let repo: Repository = serde_json::from_str(r#""ak4zh/blog""#).unwrap();
//! assert_eq!(repo.owner(), "ak4zh");
//! assert_eq!(repo.repo(), "blog");
//!
//! let repo: Repository = serde_json::from_str(r#"{"owner": "org", "repo": "site"}"#).unwrap();
//! assert_eq!(repo.full_name(), "org/site");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// A GitHub repository used as a content backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    owner: String,
    repo: String,
}

impl Repository {
    /// Creates a new repository identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::Repository;
    ///
    /// let repo = Repository::new("ak4zh", "blog");
    /// assert_eq!(repo.full_name(), "ak4zh/blog");
    /// ```
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parses a repository from the short format `"owner/repo"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not contain exactly one `/`, or
    /// if either side of it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::Repository;
    ///
    /// let repo = Repository::parse_short("ak4zh/blog").unwrap();
    /// assert_eq!(repo.owner(), "ak4zh");
    ///
    /// assert!(Repository::parse_short("invalid").is_err());
    /// assert!(Repository::parse_short("too/many/slashes").is_err());
    /// ```
    pub fn parse_short(s: &str) -> Result<Self> {
        let Some((owner, repo)) = s.split_once('/') else {
            return Err(ConfigError::InvalidRepository(format!(
                "expected 'owner/repo' format, got '{s}'"
            )));
        };

        if repo.contains('/') {
            return Err(ConfigError::InvalidRepository(format!(
                "expected 'owner/repo' format, got '{s}'"
            )));
        }

        let owner = owner.trim();
        let repo = repo.trim();

        if owner.is_empty() || repo.is_empty() {
            return Err(ConfigError::InvalidRepository(format!(
                "owner and repo cannot be empty in '{s}'"
            )));
        }

        Ok(Self::new(owner, repo))
    }

    /// Returns the repository owner segment, verbatim.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Splits the owner segment on commas, dropping empty entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::Repository;
    ///
    /// let repo = Repository::new("alice,bob", "blog");
    /// assert_eq!(repo.owner_logins().collect::<Vec<_>>(), ["alice", "bob"]);
    /// ```
    pub fn owner_logins(&self) -> impl Iterator<Item = &str> {
        self.owner
            .split(',')
            .map(str::trim)
            .filter(|login| !login.is_empty())
    }

    /// Returns the full repository name in `"owner/repo"` format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl std::str::FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_short(s)
    }
}

impl Serialize for Repository {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_name())
    }
}

impl<'de> Deserialize<'de> for Repository {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct RepositoryVisitor;

        impl<'de> Visitor<'de> for RepositoryVisitor {
            type Value = Repository;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string 'owner/repo' or an object with owner and repo fields")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Repository::parse_short(v).map_err(de::Error::custom)
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut owner: Option<String> = None;
                let mut repo: Option<String> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "owner" => {
                            if owner.is_some() {
                                return Err(de::Error::duplicate_field("owner"));
                            }
                            owner = Some(map.next_value()?);
                        }
                        "repo" => {
                            if repo.is_some() {
                                return Err(de::Error::duplicate_field("repo"));
                            }
                            repo = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                let owner = owner.ok_or_else(|| de::Error::missing_field("owner"))?;
                let repo = repo.ok_or_else(|| de::Error::missing_field("repo"))?;

                Repository::parse_short(&format!("{owner}/{repo}")).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(RepositoryVisitor)
    }
}
