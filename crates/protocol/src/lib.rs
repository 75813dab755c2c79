//! Shared types for gitcms.
//!
//! This crate defines what the sync engine stores and what GitHub sends it:
//! posts and labels, the per-repository projection, raw API payloads, and
//! decoded webhook events. It also holds the text primitives used to turn
//! an issue body into a post.
//!
//! # Overview
//!
//! - [`post`]: [`Post`], its [`Author`] and [`Reactions`]
//! - [`label`]: [`PostLabel`]
//! - [`projection`]: the per-repository [`Projection`]
//! - [`raw`]: GitHub payloads ([`RawIssue`], [`RawLabel`])
//! - [`event`]: webhook decoding ([`WebhookEvent`])
//! - [`content`]: front matter, slugs, reading time, and excerpts
//! - [`error`]: error types
//!
//! # Examples
//!
//! ```
//! use gitcms_protocol::content::{derive_slug, parse_front_matter};
//!
//! let parsed = parse_front_matter("---\nslug: hello\n---\nBody");
//! assert_eq!(parsed.data.get("slug").map(String::as_str), Some("hello"));
//! assert_eq!(parsed.content, "Body");
//!
//! assert_eq!(derive_slug("Hello, World!", Some(7), true), "hello-world-7");
//! ```

pub mod content;
pub mod error;
pub mod event;
pub mod label;
pub mod post;
pub mod projection;
pub mod raw;

pub use error::{ProtocolError, Result};
pub use event::{IssueAction, IssueEvent, LabelAction, LabelEvent, WebhookEvent};
pub use label::PostLabel;
pub use post::{Author, Post, Reactions};
pub use projection::{CmsData, Projection};
pub use raw::{RawIssue, RawIssueLabel, RawLabel, RawUser};
