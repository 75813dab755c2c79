//! Labels exposed as tags.

use serde::{Deserialize, Serialize};

/// A repository label exposed as a tag.
///
/// # Examples
///
/// ```
/// use gitcms_protocol::PostLabel;
///
/// let label = PostLabel {
///     name: "rust".to_string(),
///     description: "Posts about Rust".to_string(),
///     color: "dea584".to_string(),
///     is_default: false,
/// };
/// assert_eq!(serde_json::to_value(&label).unwrap()["color"], "dea584");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLabel {
    /// Tag name, with the configured prefix stripped.
    pub name: String,
    /// Label description; empty when GitHub has none.
    pub description: String,
    /// Hex color without the leading `#`.
    pub color: String,
    /// Whether GitHub created the label by default.
    pub is_default: bool,
}

