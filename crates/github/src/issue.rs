//! Issues as posts.
//!
//! - [`parse_post`]: turns a [`RawIssue`] into a [`Post`]
//! - [`is_publishable`]: whether an issue should be visible at all
//! - [`GitHubClient::fetch_posts`]: crawls every published issue of a repository
//!
//! # Example
//!
//! ```no_run
//! use gitcms_config::{Config, CrawlSettings, RepoOptions};
//! use gitcms_github::GitHubClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::resolve(&RepoOptions::for_repo("ak4zh/blog"))?;
//! let client = GitHubClient::new(None, &CrawlSettings::default()).await?;
//!
//! for post in client.fetch_posts(&config).await? {
//!     println!("{} ({})", post.title, post.slug);
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use tracing::{debug, instrument};

use gitcms_config::Config;
use gitcms_protocol::content::{
    derive_slug, excerpt, parse_front_matter, reading_time, strip_rendered_front_matter,
};
use gitcms_protocol::post::{DESCRIPTION_KEY, SLUG_KEY};
use gitcms_protocol::{Author, Post, RawIssue};

use crate::client::GitHubClient;
use crate::error::Result;

/// Query parameters of the issue listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueQuery<'a> {
    /// Always `all`: closed issues stay published.
    pub state: &'static str,
    pub per_page: u8,
    /// The published label, when gating is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<&'a str>,
    /// The single allowed author, when there is exactly one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<&'a str>,
}

impl<'a> IssueQuery<'a> {
    /// Builds the query for `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcms_config::{Config, RepoOptions};
    /// use gitcms_github::IssueQuery;
    ///
    /// let config = Config::resolve(&RepoOptions {
    ///     label_published: Some("+page".to_string()),
    ///     ..RepoOptions::for_repo("ak4zh/blog")
    /// }).unwrap();
    /// let query = IssueQuery::for_config(&config, 100);
    /// assert_eq!(query.labels, Some("+page"));
    /// assert_eq!(query.creator, Some("ak4zh"));
    /// ```
    #[must_use]
    pub fn for_config(config: &'a Config, per_page: u8) -> Self {
        Self {
            state: "all",
            per_page,
            labels: config
                .is_published_gated()
                .then_some(config.label_published.as_str()),
            creator: config.sole_author(),
        }
    }
}

/// Returns whether `issue` should appear as a post under `config`.
///
/// Pull requests never do. Otherwise the author must be allowed and, when
/// gating is enabled, the issue must carry the published label.
#[must_use]
pub fn is_publishable(config: &Config, issue: &RawIssue) -> bool {
    !issue.is_pull_request()
        && config.is_allowed_author(&issue.user.login)
        && (!config.is_published_gated() || issue.has_label(&config.label_published))
}

/// Converts an issue into a post.
///
/// Front matter is read from the markdown body. The rendered HTML body is
/// kept, minus its rendered front-matter block; without HTML the markdown
/// content is used instead. `slug` and `description` fall back to a
/// derived slug and an excerpt, and both are recorded in the front matter.
///
/// # Examples
///
/// ```
/// use gitcms_config::{Config, RepoOptions};
/// use gitcms_github::parse_post;
/// use gitcms_protocol::RawIssue;
///
/// let issue: RawIssue = serde_json::from_value(serde_json::json!({
///     "number": 7,
///     "title": "Hello, World!",
///     "body": "First line of the post.",
///     "created_at": "2024-01-15T10:30:00Z",
///     "updated_at": "2024-01-15T10:30:00Z",
///     "user": { "login": "ak4zh" },
///     "labels": [{ "name": "rust" }]
/// })).unwrap();
///
/// let config = Config::resolve(&RepoOptions::for_repo("ak4zh/blog")).unwrap();
/// let post = parse_post(&issue, &config);
/// assert_eq!(post.slug, "hello-world-7");
/// assert_eq!(post.description(), Some("First line of the post."));
/// assert_eq!(post.tags, ["rust"]);
/// ```
#[must_use]
pub fn parse_post(issue: &RawIssue, config: &Config) -> Post {
    let markdown = issue.body.as_deref().unwrap_or_default();
    let parsed = parse_front_matter(markdown);
    let mut front_matter = parsed.data.clone();

    let description = front_matter
        .get(DESCRIPTION_KEY)
        .cloned()
        .unwrap_or_else(|| excerpt(parsed.content));
    front_matter.insert(DESCRIPTION_KEY.to_string(), description);

    let slug = front_matter.get(SLUG_KEY).cloned().unwrap_or_else(|| {
        derive_slug(
            &issue.title,
            Some(issue.number),
            config.slug_suffix_with_issue_number,
        )
    });
    front_matter.insert(SLUG_KEY.to_string(), slug.clone());

    let body = match issue.body_html.as_deref() {
        Some(html) if parsed.has_front_matter() => strip_rendered_front_matter(html).to_string(),
        Some(html) => html.to_string(),
        None => parsed.content.to_string(),
    };

    let mut tags: Vec<String> = Vec::new();
    for name in issue.label_names().filter(|name| config.is_tag_label(name)) {
        let tag = config.tag_name(name);
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    let reading_time = reading_time(issue.body_text.as_deref().unwrap_or(markdown));

    Post {
        number: issue.number,
        slug,
        title: issue.title.clone(),
        body,
        front_matter,
        created_at: issue.created_at,
        updated_at: issue.updated_at,
        reactions: issue.reactions.clone().unwrap_or_default(),
        author: Author {
            username: issue.user.login.clone(),
            avatar_url: issue.user.avatar_url.clone(),
            is_admin: issue.user.site_admin,
        },
        tags,
        reading_time,
    }
}

impl GitHubClient {
    /// Crawls every published issue of the configured repository.
    ///
    /// Closed issues are included. Pull requests and issues by authors who
    /// are not allowed are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self, config), fields(repo = %config.repository))]
    pub async fn fetch_posts(&self, config: &Config) -> Result<Vec<Post>> {
        let route = format!(
            "/repos/{}/{}/issues",
            config.repository.owner(),
            config.repository.repo()
        );
        let query = IssueQuery::for_config(config, self.crawl_settings().per_page);
        let mut posts = Vec::new();
        let summary = self
            .crawl(&route, &query, |issue: RawIssue| {
                if is_publishable(config, &issue) {
                    posts.push(parse_post(&issue, config));
                }
            })
            .await?;
        debug!(
            listed = summary.items,
            count = posts.len(),
            pages = summary.pages,
            "fetched posts"
        );

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitcms_config::RepoOptions;
    use serde_json::json;

    fn config() -> Config {
        Config::resolve(&RepoOptions {
            label_prefix: Some("+".to_string()),
            label_published: Some("+page".to_string()),
            ..RepoOptions::for_repo("ak4zh/blog")
        })
        .unwrap()
    }

    fn issue(value: serde_json::Value) -> RawIssue {
        let mut base = json!({
            "number": 12,
            "title": "Hello World",
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-20T14:45:00Z",
            "user": { "login": "ak4zh", "avatar_url": "https://a/1.png", "site_admin": false },
            "labels": [{ "name": "+page" }, { "name": "+rust" }, { "name": "bug" }, { "name": "+rust" }]
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), value.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn query_without_gate_omits_labels() {
        let config = Config::resolve(&RepoOptions::for_repo("ak4zh/blog")).unwrap();
        let query = serde_json::to_value(IssueQuery::for_config(&config, 50)).unwrap();
        assert_eq!(
            query,
            json!({ "state": "all", "per_page": 50, "creator": "ak4zh" })
        );
    }

    #[test]
    fn query_with_several_authors_omits_creator() {
        let config = Config::resolve(&RepoOptions {
            allowed_authors: Some("alice,bob".to_string()),
            ..RepoOptions::for_repo("org/site")
        })
        .unwrap();
        assert!(IssueQuery::for_config(&config, 100).creator.is_none());
    }

    #[test]
    fn front_matter_overrides_slug_and_description() {
        let post = parse_post(
            &issue(json!({
                "body": "---\nslug: custom\ndescription: Short\n---\nBody text",
                "body_html": "<hr>\n<h2>slug: custom description: Short</h2>\n<p>Body text</p>",
                "body_text": "Body text"
            })),
            &config(),
        );

        assert_eq!(post.slug, "custom");
        assert_eq!(post.description(), Some("Short"));
        assert_eq!(post.body, "<p>Body text</p>");
        assert_eq!(post.front_matter["slug"], "custom");
    }

    #[test]
    fn derived_slug_and_excerpt_without_front_matter() {
        let post = parse_post(
            &issue(json!({
                "body": "Intro paragraph.\n\nMore text.",
                "body_html": "<p>Intro paragraph.</p>\n<p>More text.</p>"
            })),
            &config(),
        );

        assert_eq!(post.slug, "hello-world-12");
        assert_eq!(post.front_matter["slug"], "hello-world-12");
        assert_eq!(post.description(), Some("Intro paragraph."));
        assert_eq!(post.body, "<p>Intro paragraph.</p>\n<p>More text.</p>");
    }

    #[test]
    fn slug_without_suffix() {
        let config = Config::resolve(&RepoOptions {
            slug_suffix_with_issue_number: Some(false),
            ..RepoOptions::for_repo("ak4zh/blog")
        })
        .unwrap();
        assert_eq!(parse_post(&issue(json!({})), &config).slug, "hello-world");
    }

    #[test]
    fn markdown_body_when_html_missing() {
        let post = parse_post(&issue(json!({ "body": "---\na: b\n---\nPlain" })), &config());
        assert_eq!(post.body, "Plain");
    }

    #[test]
    fn tags_are_prefixed_labels_without_marker() {
        let post = parse_post(&issue(json!({})), &config());
        assert_eq!(post.tags, ["rust"]);
    }

    #[test]
    fn author_and_reactions() {
        let post = parse_post(
            &issue(json!({
                "user": { "login": "ak4zh", "avatar_url": "https://a/1.png", "site_admin": true },
                "reactions": { "total_count": 2, "+1": 1, "rocket": 1 }
            })),
            &config(),
        );
        assert_eq!(post.author.username, "ak4zh");
        assert!(post.author.is_admin);
        assert_eq!(post.reactions.plus_one, 1);
        assert_eq!(post.reactions.rocket, 1);
        assert_eq!(post.reading_time, "1 minute");
    }

    #[test]
    fn reading_time_uses_text_body() {
        let text = "word ".repeat(500);
        let post = parse_post(&issue(json!({ "body": "short", "body_text": text })), &config());
        assert_eq!(post.reading_time, "3 minutes");
    }

    #[test]
    fn publishable_rules() {
        let config = config();
        assert!(is_publishable(&config, &issue(json!({}))));
        assert!(!is_publishable(&config, &issue(json!({ "labels": [{ "name": "+rust" }] }))));
        assert!(!is_publishable(&config, &issue(json!({ "user": { "login": "mallory" } }))));
        assert!(!is_publishable(
            &config,
            &issue(json!({ "pull_request": { "url": "https://x" } }))
        ));
    }
}
