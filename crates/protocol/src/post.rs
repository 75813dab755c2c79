//! Posts: published issues as the content layer sees them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Front-matter key holding the post description.
pub const DESCRIPTION_KEY: &str = "description";

/// Front-matter key holding an explicit slug.
pub const SLUG_KEY: &str = "slug";

/// Reaction counts attached to an issue.
///
/// Unknown keys (such as the reactions `url`) are ignored and missing
/// counts default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reactions {
    /// Sum of every reaction.
    pub total_count: u64,
    /// 👍
    #[serde(rename = "+1")]
    pub plus_one: u64,
    /// 👎
    #[serde(rename = "-1")]
    pub minus_one: u64,
    /// 😄
    pub laugh: u64,
    /// 🎉
    pub hooray: u64,
    /// 😕
    pub confused: u64,
    /// ❤️
    pub heart: u64,
    /// 🚀
    pub rocket: u64,
    /// 👀
    pub eyes: u64,
}

/// The author of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// GitHub login.
    pub username: String,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Whether the user is a GitHub site administrator.
    pub is_admin: bool,
}

/// A published issue.
///
/// Posts are identified by their issue `number` within a repository; the
/// `slug` is derived and may change when the title is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Issue number.
    pub number: u64,
    /// URL-safe identifier, explicit from front matter or derived from the title.
    pub slug: String,
    /// Issue title.
    pub title: String,
    /// Rendered body, with the front-matter block removed.
    pub body: String,
    /// Front-matter entries, always including `slug` and `description`.
    pub front_matter: BTreeMap<String, String>,
    /// When the issue was opened.
    pub created_at: DateTime<Utc>,
    /// When the issue was last changed.
    pub updated_at: DateTime<Utc>,
    /// Reaction counts.
    pub reactions: Reactions,
    /// Issue author.
    pub author: Author,
    /// Tag names, prefix stripped, in label order, without duplicates.
    pub tags: Vec<String>,
    /// Reading time, such as `"3 minutes"`.
    pub reading_time: String,
}

impl Post {
    /// Returns the post description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.front_matter.get(DESCRIPTION_KEY).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reactions_from_github_json() {
        let reactions: Reactions = serde_json::from_str(
            r#"{"url": "https://api.github.com/x", "total_count": 3, "+1": 2, "-1": 0, "heart": 1}"#,
        )
        .unwrap();
        assert_eq!(reactions.total_count, 3);
        assert_eq!(reactions.plus_one, 2);
        assert_eq!(reactions.heart, 1);
        assert_eq!(reactions.rocket, 0);
    }

    #[test]
    fn reactions_serialize_with_github_names() {
        let json = serde_json::to_value(Reactions {
            plus_one: 4,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["+1"], 4);
        assert_eq!(json["-1"], 0);
    }
}
