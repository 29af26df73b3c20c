//! HTTP front-end. Routing and response shaping only: the catalog is rebuilt
//! on every page render and selections go straight to the store handle held in
//! `AppState`.

mod api;
mod page;
mod static_files;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task;

use crate::catalog::{list_backgrounds, list_sounds, DiscoveryMode};
use crate::config::Config;
use crate::db::SelectionStore;

pub use api::ApiError;
pub use page::{escape_html, render_index};

/// Everything a request handler needs. Cheap to clone; the store is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<SelectionStore>,
    pub public_dir: PathBuf,
    pub backgrounds_dir: PathBuf,
    pub discovery_mode: DiscoveryMode,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<SelectionStore>) -> Self {
        Self {
            store,
            public_dir: config.public_dir.clone(),
            backgrounds_dir: config.backgrounds_dir.clone(),
            discovery_mode: config.discovery_mode,
        }
    }
}

/// Build the router. Kept separate from `serve` so tests can drive it without
/// binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/public/{*path}", get(static_files::serve_public))
        .route(
            "/api/get-background",
            get(api::get_background).fallback(api::method_not_allowed),
        )
        .route(
            "/api/save-background",
            post(api::save_background).fallback(api::method_not_allowed),
        )
        .route(
            "/api/get-sound",
            get(api::get_sound).fallback(api::method_not_allowed),
        )
        .route(
            "/api/save-sound",
            post(api::save_sound).fallback(api::method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state)
}

/// Bind, optionally open the browser, and serve until Ctrl-C.
pub async fn serve(config: &Config, store: Arc<SelectionStore>) -> Result<()> {
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let local_addr = listener.local_addr().context("failed to read bound address")?;

    tracing::info!(
        addr = %local_addr,
        backgrounds = %config.backgrounds_dir.display(),
        mode = ?config.discovery_mode,
        "Server running on http://{local_addr}"
    );

    if config.open_browser {
        let url = config.page_url();
        if let Err(err) = open::that(&url) {
            tracing::warn!(%url, error = %err, "failed to open browser");
        }
    }

    axum::serve(listener, router(AppState::new(config, store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Render the page. An unreadable backgrounds directory is shown as an empty
/// catalog rather than failing the request. The scan is blocking filesystem
/// work, so it runs on the blocking pool.
async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let AppState {
        backgrounds_dir,
        discovery_mode,
        ..
    } = state;
    let scan = task::spawn_blocking(move || list_backgrounds(&backgrounds_dir, discovery_mode))
        .await
        .map_err(|source| ApiError::Task {
            message: "Failed to read backgrounds",
            source,
        })?;

    let backgrounds = scan.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "rendering without backgrounds");
        Vec::new()
    });
    Ok(Html(render_index(&backgrounds, list_sounds())))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}
