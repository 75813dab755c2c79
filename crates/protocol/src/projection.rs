//! The in-memory projection of a repository.
//!
//! A [`Projection`] holds the published posts and tag labels of one
//! repository. Posts are keyed by issue number and labels by their numeric
//! id, so renames and title edits never leave stale duplicates behind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::label::PostLabel;
use crate::post::Post;

/// Published posts and tag labels of one repository.
///
/// # Examples
///
/// ```
/// use gitcms_protocol::{PostLabel, Projection};
///
/// let mut projection = Projection::default();
/// projection.upsert_label(7, PostLabel { name: "rust".to_string(), ..Default::default() });
/// projection.upsert_label(3, PostLabel { name: "async".to_string(), ..Default::default() });
///
/// let names: Vec<_> = projection.labels_by_name().iter().map(|l| l.name.as_str()).collect();
/// assert_eq!(names, ["async", "rust"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    posts: BTreeMap<u64, Post>,
    labels: BTreeMap<u64, PostLabel>,
}

/// A sorted snapshot of a projection, as served to readers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsData {
    /// Posts, newest issue first.
    pub posts: Vec<Post>,
    /// Labels, sorted by name.
    pub labels: Vec<PostLabel>,
}

impl Projection {
    /// Creates an empty projection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the post with `post.number`.
    ///
    /// Any other post holding the same slug is evicted, so a slug always
    /// resolves to the most recently written post. Returns the post that
    /// previously had this number.
    pub fn upsert_post(&mut self, post: Post) -> Option<Post> {
        let number = post.number;
        self.posts
            .retain(|&other, existing| other == number || existing.slug != post.slug);
        self.posts.insert(number, post)
    }

    /// Removes the post with `number`. Absent posts are not an error.
    pub fn remove_post(&mut self, number: u64) -> Option<Post> {
        self.posts.remove(&number)
    }

    /// Returns the post with `number`.
    #[must_use]
    pub fn post(&self, number: u64) -> Option<&Post> {
        self.posts.get(&number)
    }

    /// Returns the post whose slug is `slug`.
    #[must_use]
    pub fn post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.values().find(|post| post.slug == slug)
    }

    /// Returns every post, newest issue first.
    #[must_use]
    pub fn posts_newest_first(&self) -> Vec<&Post> {
        self.posts.values().rev().collect()
    }

    /// Returns the number of posts.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Inserts or replaces the label with `id`.
    pub fn upsert_label(&mut self, id: u64, label: PostLabel) -> Option<PostLabel> {
        self.labels.insert(id, label)
    }

    /// Removes the label with `id`. Absent labels are not an error.
    pub fn remove_label(&mut self, id: u64) -> Option<PostLabel> {
        self.labels.remove(&id)
    }

    /// Returns the label with `id`.
    #[must_use]
    pub fn label(&self, id: u64) -> Option<&PostLabel> {
        self.labels.get(&id)
    }

    /// Returns every label, sorted by name.
    #[must_use]
    pub fn labels_by_name(&self) -> Vec<&PostLabel> {
        let mut labels: Vec<_> = self.labels.values().collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name));
        labels
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the projection holds neither posts nor labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.labels.is_empty()
    }

    /// Returns a sorted, owned snapshot.
    #[must_use]
    pub fn to_cms_data(&self) -> CmsData {
        CmsData {
            posts: self.posts_newest_first().into_iter().cloned().collect(),
            labels: self.labels_by_name().into_iter().cloned().collect(),
        }
    }
}
