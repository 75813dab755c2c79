//! Payloads as received from GitHub.
//!
//! These types only name the fields the content layer reads; everything
//! else in GitHub's JSON is ignored. They are never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::post::Reactions;

/// The user that opened an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    /// GitHub login.
    pub login: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Whether the user is a GitHub site administrator.
    #[serde(default)]
    pub site_admin: bool,
}

/// A label as embedded in an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssueLabel {
    /// Label name.
    pub name: String,
}

/// An issue from the Issues API or an `issues` webhook.
///
/// `body_html` and `body_text` are only present when the request asked for
/// the `application/vnd.github.full+json` media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    /// Issue number.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub body: Option<String>,
    /// Rendered HTML body.
    #[serde(default)]
    pub body_html: Option<String>,
    /// Plain-text body.
    #[serde(default)]
    pub body_text: Option<String>,
    /// When the issue was opened.
    pub created_at: DateTime<Utc>,
    /// When the issue was last changed.
    pub updated_at: DateTime<Utc>,
    /// Reaction counts.
    #[serde(default)]
    pub reactions: Option<Reactions>,
    /// Issue author.
    pub user: RawUser,
    /// Labels currently on the issue.
    #[serde(default)]
    pub labels: Vec<RawIssueLabel>,
    /// Present when the "issue" is a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    /// Returns the names of the labels on the issue.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| label.name.as_str())
    }

    /// Returns whether the issue carries a label named `name`.
    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.label_names().any(|label| label == name)
    }

    /// Returns whether this entry is a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// A label from the Labels API or a `label` webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLabel {
    /// Numeric label identifier, stable across renames.
    pub id: u64,
    /// Label name.
    pub name: String,
    /// Label description.
    #[serde(default)]
    pub description: Option<String>,
    /// Hex color without the leading `#`.
    #[serde(default)]
    pub color: String,
    /// Whether GitHub created the label by default.
    #[serde(default)]
    pub default: bool,
}
