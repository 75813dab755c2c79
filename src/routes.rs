//! HTTP routes.
//!
//! | Route | Effect |
//! |-------|--------|
//! | `POST /api/git/webhook` | reconcile one delivery, always `200 ok` |
//! | `GET /api/git/webhook` | posts of the primary repository, newest first |
//! | `GET /api/cms/{owner}/{repo}` | sync on demand, then sorted posts and labels |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use gitcms_config::auth::resolve_token;
use gitcms_config::{RepoOptions, Settings};
use gitcms_engine::{Bootstrapper, Reconciler, Store, SyncError, Tenancy};
use gitcms_protocol::{CmsData, Post};

/// Shared state of every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    settings: Arc<Settings>,
    tenancy: Tenancy,
    bootstrapper: Bootstrapper,
    reconciler: Reconciler,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let store = Arc::new(Store::new());
        let tenancy = Tenancy::from_settings(&settings);
        Self {
            bootstrapper: Bootstrapper::new(Arc::clone(&store), settings.crawl.clone()),
            reconciler: Reconciler::new(store, tenancy.clone())
                .with_repositories(settings.repositories.clone()),
            tenancy,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn store(&self) -> &Store {
        self.bootstrapper.store()
    }

    /// The repository `GET /api/git/webhook` reports on.
    fn primary_repository(&self) -> Option<&str> {
        self.settings.repositories.first().map(|r| r.repo.as_str())
    }

    /// Options used to sync `repo_id`, or `None` if it may not be served.
    ///
    /// Configured repositories use their own options. Other repositories
    /// are served with defaults unless the server is single-tenant. The
    /// token falls back to `GITHUB_TOKEN` then `GH_TOKEN`.
    fn options_for(&self, repo_id: &str) -> Option<RepoOptions> {
        let mut options = match self.settings.repository(repo_id) {
            Some(options) => options.clone(),
            None if self.tenancy.accepts(repo_id) => RepoOptions::for_repo(repo_id),
            None => return None,
        };
        options.auth_token = resolve_token(options.auth_token.as_deref(), |key| {
            std::env::var(key).ok()
        });
        Some(options)
    }

    /// Starts the full sync of every configured repository in the background.
    pub fn spawn_initial_syncs(&self) {
        for options in &self.settings.repositories {
            let Some(options) = self.options_for(&options.repo) else {
                continue;
            };
            let bootstrapper = self.bootstrapper.clone();
            tokio::spawn(async move {
                if let Err(err) = bootstrapper.sync(&options).await {
                    warn!(repo = %options.repo, error = %err, "initial sync failed");
                }
            });
        }
    }
}

/// Builds the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/git/webhook", get(list_posts).post(receive_webhook))
        .route("/api/cms/{owner}/{repo}", get(cms_data))
        .with_state(state)
}

async fn receive_webhook(State(state): State<AppState>, body: Bytes) -> &'static str {
    state.reconciler.handle(&body).await;
    "ok"
}

#[derive(Debug, Serialize)]
struct PostsResponse {
    posts: Vec<Post>,
}

async fn list_posts(State(state): State<AppState>) -> Json<PostsResponse> {
    let posts = match state.primary_repository() {
        Some(repo_id) => state
            .store()
            .cms_data(repo_id)
            .await
            .map(|data| data.posts)
            .unwrap_or_default(),
        None => Vec::new(),
    };
    Json(PostsResponse { posts })
}

async fn cms_data(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<CmsData>, ApiError> {
    let repo_id = format!("{owner}/{repo}");
    let options = state
        .options_for(&repo_id)
        .ok_or_else(|| ApiError::UnknownRepository(repo_id.clone()))?;

    state.bootstrapper.sync(&options).await?;
    let data = state.store().cms_data(&repo_id).await.unwrap_or_default();
    Ok(Json(data))
}

/// Errors surfaced by the read routes.
#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("repository {0} is not served here")]
    UnknownRepository(String),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownRepository(_) => StatusCode::NOT_FOUND,
            Self::Sync(SyncError::Config(_)) => StatusCode::BAD_REQUEST,
            Self::Sync(SyncError::GitHub(_)) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}
