//! gitcms - serve GitHub issues as blog posts.
//!
//! This is the main binary. It loads [`Settings`], starts the full sync of
//! every configured repository and serves the webhook and read routes.

mod routes;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitcms_config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitcms=info,gitcms_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let state = routes::AppState::new(settings);
    state.spawn_initial_syncs();

    let listener = tokio::net::TcpListener::bind(&state.settings().listen)
        .await
        .with_context(|| format!("failed to bind {}", state.settings().listen))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, routes::router(state)).await?;
    Ok(())
}
