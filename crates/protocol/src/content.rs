//! Text primitives for turning issue bodies into posts.
//!
//! - [`parse_front_matter`]: split a leading `---` block of `key: value` lines
//!   from the body
//! - [`slugify`] / [`derive_slug`]: URL-safe post identifiers
//! - [`reading_time`]: human estimate of reading time
//! - [`excerpt`]: default description of a post
//! - [`strip_rendered_front_matter`]: drop the rendered front-matter block from
//!   GitHub's HTML
//!
//! # Example
//!
//! ```
//! use gitcms_protocol::content::{derive_slug, parse_front_matter, reading_time};
//!
//! let parsed = parse_front_matter("---\ntitle: Hi\n---\nBody text");
//! assert_eq!(parsed.data["title"], "Hi");
//! assert_eq!(parsed.content, "Body text");
//!
//! assert_eq!(derive_slug("Hello, World!", Some(7), true), "hello-world-7");
//! assert_eq!(reading_time("just a few words"), "1 minute");
//! ```

use std::collections::BTreeMap;

use unicode_normalization::UnicodeNormalization;

/// Reading speed used by [`reading_time`].
pub const WORDS_PER_MINUTE: usize = 225;

/// Maximum length, in characters, of an [`excerpt`].
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Closing tag GitHub wraps the rendered front-matter block in.
const RENDERED_FRONT_MATTER_END: &str = "</h2>";

/// A body split into its front matter and the remaining content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedContent<'a> {
    /// Everything after the front-matter block, or the whole body.
    pub content: &'a str,
    /// The `key: value` pairs of the front-matter block.
    pub data: BTreeMap<String, String>,
}

impl ParsedContent<'_> {
    /// Returns whether a front-matter block was found.
    #[must_use]
    pub fn has_front_matter(&self) -> bool {
        !self.data.is_empty()
    }
}

/// Splits a leading front-matter block off `text`.
///
/// The opening delimiter is the first line when it is made only of `-`.
/// The block ends at the next line made of exactly the same run. Each line
/// of the block of the form `key: value` (with `key` a bare identifier)
/// becomes an entry; other lines are ignored and later keys win.
///
/// Without an opening delimiter, or without a matching closing one, `data`
/// is empty and `content` is the whole input.
///
/// # Examples
///
/// ```
/// use gitcms_protocol::content::parse_front_matter;
///
/// let parsed = parse_front_matter("-----\nslug: custom\ndate: 2024-01-01\n-----\n\nHello");
/// assert_eq!(parsed.data["slug"], "custom");
/// assert_eq!(parsed.data["date"], "2024-01-01");
/// assert_eq!(parsed.content, "\nHello");
///
/// let parsed = parse_front_matter("No front matter here");
/// assert!(parsed.data.is_empty());
/// assert_eq!(parsed.content, "No front matter here");
/// ```
#[must_use]
pub fn parse_front_matter(text: &str) -> ParsedContent<'_> {
    let plain = ParsedContent {
        content: text,
        data: BTreeMap::new(),
    };

    let mut lines = text.split_inclusive('\n');
    let Some(opening) = lines.next() else {
        return plain;
    };
    let delimiter = opening.trim_end();
    if delimiter.is_empty() || !delimiter.bytes().all(|b| b == b'-') {
        return plain;
    }

    let mut offset = opening.len();
    for line in lines {
        if line.trim_end() == delimiter {
            let block = &text[opening.len()..offset];
            return ParsedContent {
                content: &text[offset + line.len()..],
                data: block.lines().filter_map(parse_entry).collect(),
            };
        }
        offset += line.len();
    }

    plain
}

/// Parses one `key: value` line.
fn parse_entry(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    let value = value.trim();

    let is_identifier = key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if key.is_empty() || !is_identifier || value.is_empty() {
        return None;
    }

    Some((key.to_string(), value.to_string()))
}

/// Normalizes text into a URL-safe token.
///
/// The text is decomposed (NFKD) so accents fall off, lowercased, and its
/// whitespace runs become single hyphens. Anything outside `[a-z0-9_-]` is
/// dropped, repeated hyphens collapse, and hyphens at either end are removed.
/// Applying it to its own output changes nothing.
///
/// # Examples
///
/// ```
/// use gitcms_protocol::content::slugify;
///
/// assert_eq!(slugify("  Héllo   Wörld: Ça va?  "), "hello-world-ca-va");
/// assert_eq!(slugify("Rust -- the  good parts"), "rust-the-good-parts");
/// assert_eq!(slugify(&slugify("Crème Brûlée!")), slugify("Crème Brûlée!"));
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let normalized = text.nfkd().collect::<String>().to_lowercase();

    let mut slug = String::with_capacity(normalized.len());
    for word in normalized.split_whitespace() {
        slug.push('-');
        slug.extend(
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-'),
        );
    }

    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    collapsed.trim_matches('-').to_string()
}

/// Derives the slug of a post from its title.
///
/// With `suffix_with_number` set and a number present, `-{number}` is
/// appended so that posts with the same title stay distinct.
///
/// # Examples
///
/// ```
/// use gitcms_protocol::content::derive_slug;
///
/// assert_eq!(derive_slug("My First Post", Some(12), true), "my-first-post-12");
/// assert_eq!(derive_slug("My First Post", Some(12), false), "my-first-post");
/// assert_eq!(derive_slug("My First Post", None, true), "my-first-post");
/// assert_eq!(derive_slug("???", Some(3), true), "3");
/// ```
#[must_use]
pub fn derive_slug(title: &str, number: Option<u64>, suffix_with_number: bool) -> String {
    let base = slugify(title);
    match number.filter(|_| suffix_with_number) {
        Some(number) if base.is_empty() => number.to_string(),
        Some(number) => format!("{base}-{number}"),
        None => base,
    }
}

/// Estimates how long `text` takes to read.
///
/// Counts whitespace-separated words at [`WORDS_PER_MINUTE`], rounding up,
/// and never reports less than one minute.
///
/// # Examples
///
/// ```
/// use gitcms_protocol::content::reading_time;
///
/// assert_eq!(reading_time(""), "1 minute");
/// assert_eq!(reading_time(&"word ".repeat(226)), "2 minutes");
/// ```
#[must_use]
pub fn reading_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    if minutes > 1 {
        format!("{minutes} minutes")
    } else {
        format!("{minutes} minute")
    }
}

/// Returns the first non-empty line of `content`, cut to
/// [`EXCERPT_MAX_CHARS`] characters.
///
/// # Examples
///
/// ```
/// use gitcms_protocol::content::excerpt;
///
/// assert_eq!(excerpt("\n\n  First line.  \nSecond line"), "First line.");
/// assert_eq!(excerpt(""), "");
/// ```
#[must_use]
pub fn excerpt(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(EXCERPT_MAX_CHARS).collect())
        .unwrap_or_default()
}

/// Removes the rendered front-matter block from GitHub's HTML.
///
/// GitHub renders a `---` block as a horizontal rule followed by a setext
/// heading, so everything up to and including the first `</h2>` goes.
/// HTML without that tag is returned unchanged.
///
/// # Examples
///
/// ```
/// use gitcms_protocol::content::strip_rendered_front_matter;
///
/// let html = "<hr>\n<h2>title: Hi</h2>\n<p>Body</p>\n<h2>Section</h2>";
/// assert_eq!(strip_rendered_front_matter(html), "<p>Body</p>\n<h2>Section</h2>");
/// ```
#[must_use]
pub fn strip_rendered_front_matter(html: &str) -> &str {
    match html.find(RENDERED_FRONT_MATTER_END) {
        Some(end) => html[end + RENDERED_FRONT_MATTER_END.len()..].trim_start(),
        None => html,
    }
}
