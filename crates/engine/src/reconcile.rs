//! Webhook reconciliation.
//!
//! [`reconcile`] applies one decoded event to a projection. It is a pure
//! function of the configuration, the projection and the event, so the
//! same delivery applied twice leaves the projection as one application
//! did. [`Reconciler`] decodes raw deliveries, picks the repository entry
//! named by the payload and applies the event under that entry's lock.
//!
//! # Issue events
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | author not allowed | ignored |
//! | `deleted` | post removed |
//! | `unlabeled`, gated, published label gone | post removed |
//! | not gated, or published label present | post upserted |
//! | otherwise | ignored |
//!
//! # Label events
//!
//! Labels that are not tags (empty name, published marker, missing prefix)
//! are ignored. `deleted` removes the tag; `created` and `edited` upsert it.
//! Tags are keyed by label id, so an `edited` event renaming a tag into a
//! non-tag label removes the tag stored under that id.

use std::sync::Arc;

use tracing::{debug, instrument};

use gitcms_config::{Config, RepoOptions, Settings};
use gitcms_github::{parse_label, parse_post};
use gitcms_protocol::{
    IssueAction, IssueEvent, LabelAction, LabelEvent, Projection, WebhookEvent,
};

use crate::store::{RepoEntry, Store};

/// The change an event made to a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    PostUpserted { number: u64, slug: String },
    PostRemoved { number: u64 },
    LabelUpserted { id: u64, name: String },
    LabelRemoved { id: u64 },
    /// Irrelevant, unauthorized, unpublished or malformed.
    Ignored,
}

/// Applies `event` to `projection`.
///
/// # Examples
///
/// ```
/// use gitcms_config::Config;
/// use gitcms_engine::{Transition, reconcile};
/// use gitcms_protocol::{Projection, WebhookEvent};
///
/// let config = Config::defaults_for("ak4zh/blog").unwrap();
/// let mut projection = Projection::new();
/// let transition = reconcile(&config, &mut projection, &WebhookEvent::Unrecognized);
/// assert_eq!(transition, Transition::Ignored);
/// ```
#[must_use]
pub fn reconcile(config: &Config, projection: &mut Projection, event: &WebhookEvent) -> Transition {
    match event {
        WebhookEvent::Issue(event) => reconcile_issue(config, projection, event),
        WebhookEvent::Label(event) => reconcile_label(config, projection, event),
        WebhookEvent::Unrecognized => Transition::Ignored,
    }
}

fn reconcile_issue(config: &Config, projection: &mut Projection, event: &IssueEvent) -> Transition {
    let issue = &event.issue;
    if !config.is_allowed_author(&issue.user.login) {
        return Transition::Ignored;
    }

    let published = !config.is_published_gated() || issue.has_label(&config.label_published);
    let withdrawn = event.action == IssueAction::Unlabeled && !published;

    if event.action == IssueAction::Deleted || withdrawn {
        projection.remove_post(issue.number);
        Transition::PostRemoved {
            number: issue.number,
        }
    } else if published {
        let post = parse_post(issue, config);
        let slug = post.slug.clone();
        projection.upsert_post(post);
        Transition::PostUpserted {
            number: issue.number,
            slug,
        }
    } else {
        Transition::Ignored
    }
}

fn reconcile_label(config: &Config, projection: &mut Projection, event: &LabelEvent) -> Transition {
    let id = event.label.id;
    let Some(tag) = parse_label(&event.label, config) else {
        if event.action == LabelAction::Edited && projection.remove_label(id).is_some() {
            return Transition::LabelRemoved { id };
        }
        return Transition::Ignored;
    };

    match event.action {
        LabelAction::Deleted => {
            projection.remove_label(id);
            Transition::LabelRemoved { id }
        }
        LabelAction::Created | LabelAction::Edited => {
            let name = tag.name.clone();
            projection.upsert_label(id, tag);
            Transition::LabelUpserted { id, name }
        }
    }
}

/// Which repositories a reconciler accepts events for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Tenancy {
    /// Any repository; entries are created on demand.
    #[default]
    Multi,
    /// Only the named repository.
    Single(String),
}

impl Tenancy {
    /// Derives the tenancy from server settings.
    ///
    /// A single-tenant server serves its first configured repository.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.repositories.first() {
            Some(options) if settings.single_tenant => Self::Single(options.repo.clone()),
            _ => Self::Multi,
        }
    }

    /// Returns whether events for `repo_id` are accepted.
    #[must_use]
    pub fn accepts(&self, repo_id: &str) -> bool {
        match self {
            Self::Multi => true,
            Self::Single(only) => only.eq_ignore_ascii_case(repo_id),
        }
    }
}

/// Applies webhook deliveries to the store.
#[derive(Debug, Clone)]
pub struct Reconciler {
    store: Arc<Store>,
    tenancy: Tenancy,
    repositories: Arc<[RepoOptions]>,
}

impl Reconciler {
    /// Creates a reconciler writing into `store`.
    ///
    /// Without configured repositories, entries created by webhooks use
    /// [`Config::defaults_for`].
    #[must_use]
    pub fn new(store: Arc<Store>, tenancy: Tenancy) -> Self {
        Self {
            store,
            tenancy,
            repositories: Arc::from(Vec::new()),
        }
    }

    /// Uses `repositories` to configure entries created by webhooks.
    #[must_use]
    pub fn with_repositories(mut self, repositories: Vec<RepoOptions>) -> Self {
        self.repositories = repositories.into();
        self
    }

    /// Creates a reconciler for the tenancy and repositories of `settings`.
    #[must_use]
    pub fn from_settings(store: Arc<Store>, settings: &Settings) -> Self {
        Self::new(store, Tenancy::from_settings(settings))
            .with_repositories(settings.repositories.clone())
    }

    /// Configuration for an entry created by a webhook.
    fn config_for(&self, repo_id: &str) -> gitcms_config::Result<Config> {
        match self
            .repositories
            .iter()
            .find(|options| options.repo.eq_ignore_ascii_case(repo_id))
        {
            Some(options) => Config::resolve(options),
            None => Config::defaults_for(repo_id),
        }
    }

    /// Decodes and applies a raw webhook body.
    ///
    /// Never fails: undecodable deliveries are ignored.
    #[instrument(skip(self, payload), fields(len = payload.len()))]
    pub async fn handle(&self, payload: &[u8]) -> Transition {
        match WebhookEvent::parse(payload) {
            Ok(event) => self.apply(&event).await,
            Err(err) => {
                debug!(error = %err, "ignoring undecodable webhook");
                Transition::Ignored
            }
        }
    }

    /// Applies a decoded event to the entry of the repository it names.
    ///
    /// A repository without an entry gets one with its configured options,
    /// or defaults if nobody configured it.
    pub async fn apply(&self, event: &WebhookEvent) -> Transition {
        let Some(repo_id) = event.repository() else {
            return Transition::Ignored;
        };
        if !self.tenancy.accepts(repo_id) {
            debug!(repo = repo_id, "ignoring webhook for another repository");
            return Transition::Ignored;
        }

        let slot = self.store.slot(repo_id).await;
        let mut guard = slot.entry.lock().await;
        if guard.is_none() {
            match self.config_for(repo_id) {
                Ok(config) => {
                    debug!(repo = repo_id, "creating entry from webhook");
                    *guard = Some(RepoEntry {
                        config,
                        projection: Projection::new(),
                    });
                }
                Err(err) => {
                    debug!(repo = repo_id, error = %err, "ignoring webhook for invalid repository");
                    return Transition::Ignored;
                }
            }
        }
        let Some(entry) = guard.as_mut() else {
            return Transition::Ignored;
        };

        let transition = reconcile(&entry.config, &mut entry.projection, event);
        debug!(repo = repo_id, ?transition, "reconciled webhook");
        transition
    }
}
