//! Labels as tags.

use serde::Serialize;
use tracing::{debug, instrument};

use gitcms_config::Config;
use gitcms_protocol::{PostLabel, RawLabel};

use crate::client::GitHubClient;
use crate::error::Result;

/// Query parameters of the label listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct LabelQuery {
    per_page: u8,
}

/// Converts a GitHub label into a tag, or `None` if it is not one.
///
/// # Examples
///
/// ```
/// use gitcms_config::{Config, RepoOptions};
/// use gitcms_github::parse_label;
/// use gitcms_protocol::RawLabel;
///
/// let config = Config::resolve(&RepoOptions {
///     label_prefix: Some("+".to_string()),
///     ..RepoOptions::for_repo("ak4zh/blog")
/// }).unwrap();
/// let label = RawLabel {
///     id: 1,
///     name: "+rust".to_string(),
///     description: None,
///     color: "dea584".to_string(),
///     default: false,
/// };
/// assert_eq!(parse_label(&label, &config).unwrap().name, "rust");
/// ```
#[must_use]
pub fn parse_label(label: &RawLabel, config: &Config) -> Option<PostLabel> {
    if label.name.is_empty() || !config.is_tag_label(&label.name) {
        return None;
    }
    Some(PostLabel {
        name: config.tag_name(&label.name).to_string(),
        description: label.description.clone().unwrap_or_default(),
        color: label.color.clone(),
        is_default: label.default,
    })
}

impl GitHubClient {
    /// Crawls every tag label of the configured repository, keyed by label id.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self, config), fields(repo = %config.repository))]
    pub async fn fetch_labels(&self, config: &Config) -> Result<Vec<(u64, PostLabel)>> {
        let route = format!(
            "/repos/{}/{}/labels",
            config.repository.owner(),
            config.repository.repo()
        );
        let query = LabelQuery {
            per_page: self.crawl_settings().per_page,
        };
        let mut labels = Vec::new();
        let summary = self
            .crawl(&route, &query, |label: RawLabel| {
                if let Some(tag) = parse_label(&label, config) {
                    labels.push((label.id, tag));
                }
            })
            .await?;
        debug!(listed = summary.items, count = labels.len(), "fetched labels");

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitcms_config::RepoOptions;

    fn raw(id: u64, name: &str) -> RawLabel {
        RawLabel {
            id,
            name: name.to_string(),
            description: Some("desc".to_string()),
            color: "ffffff".to_string(),
            default: id == 1,
        }
    }

    #[test]
    fn marker_and_unprefixed_labels_are_not_tags() {
        let config = Config::resolve(&RepoOptions {
            label_prefix: Some("+".to_string()),
            label_published: Some("+page".to_string()),
            ..RepoOptions::for_repo("ak4zh/blog")
        })
        .unwrap();

        assert!(parse_label(&raw(1, "+page"), &config).is_none());
        assert!(parse_label(&raw(2, "bug"), &config).is_none());
        assert!(parse_label(&raw(3, ""), &config).is_none());

        let tag = parse_label(&raw(4, "+async"), &config).unwrap();
        assert_eq!(tag.name, "async");
        assert_eq!(tag.description, "desc");
    }

    #[test]
    fn every_label_is_a_tag_without_prefix() {
        let config = Config::resolve(&RepoOptions::for_repo("ak4zh/blog")).unwrap();
        let tag = parse_label(&raw(1, "bug"), &config).unwrap();
        assert_eq!(tag.name, "bug");
        assert!(tag.is_default);
    }
}
