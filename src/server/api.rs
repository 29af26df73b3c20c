//! JSON endpoints for reading and saving the current selection. Each handler
//! is a thin shell around `db::get_selection` / `db::set_selection`; the only
//! logic here is body parsing and mapping failures to status codes.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::{self, JoinError};

use crate::db::{get_selection, set_selection};
use crate::error::StoreError;
use crate::models::SelectionKey;
use crate::server::AppState;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Body was not JSON or lacked the expected string field. Maps to 400.
    #[error("Invalid request")]
    MalformedRequest(#[source] serde_json::Error),

    /// Route exists but not for this verb. Maps to 405.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// `message` is what the client sees; the store error is only logged.
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    /// The blocking task running a store call or directory scan panicked or
    /// was cancelled. Maps to 500 like a storage failure.
    #[error("{message}")]
    Task {
        message: &'static str,
        #[source]
        source: JoinError,
    },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage { .. } | ApiError::Task { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage { source, .. } => {
                tracing::error!(error = %source, "{}", self);
            }
            ApiError::Task { source, .. } => {
                tracing::error!(error = %source, "{}", self);
            }
            ApiError::MalformedRequest(err) => {
                tracing::debug!(error = %err, "rejected request body");
            }
            ApiError::MethodNotAllowed => {}
        }
        (self.status(), self.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SaveBackgroundRequest {
    background: String,
}

/// The browser also sends an `action` field ("add"/"remove"); only the sound
/// itself is persisted.
#[derive(Debug, Deserialize)]
struct SaveSoundRequest {
    sound: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BackgroundResponse {
    pub background: String,
}

#[derive(Debug, Serialize)]
pub struct SoundResponse {
    pub sound: String,
}

pub async fn get_background(
    State(state): State<AppState>,
) -> Result<Json<BackgroundResponse>, ApiError> {
    let background = load(&state, SelectionKey::Background, "Failed to get background").await?;
    Ok(Json(BackgroundResponse { background }))
}

pub async fn get_sound(State(state): State<AppState>) -> Result<Json<SoundResponse>, ApiError> {
    let sound = load(&state, SelectionKey::Sound, "Failed to get sound").await?;
    Ok(Json(SoundResponse { sound }))
}

pub async fn save_background(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    let request: SaveBackgroundRequest = parse_body(&body)?;
    store(
        &state,
        SelectionKey::Background,
        request.background,
        "Failed to save background",
    )
    .await
}

pub async fn save_sound(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    let request: SaveSoundRequest = parse_body(&body)?;
    store(&state, SelectionKey::Sound, request.sound, "Failed to save sound").await
}

/// Fallback for API routes hit with the wrong verb.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Parse by hand instead of using the `Json` extractor so every bad body,
/// including a missing content type, maps to the same 400.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::MalformedRequest)
}

/// Unset selections read back as an empty string. SQLite may sit in its busy
/// handler for seconds while another connection holds the write lock, so the
/// query runs on the blocking pool rather than a runtime worker.
async fn load(
    state: &AppState,
    key: SelectionKey,
    message: &'static str,
) -> Result<String, ApiError> {
    let store = state.store.clone();
    task::spawn_blocking(move || get_selection(&store, key))
        .await
        .map_err(|source| ApiError::Task { message, source })?
        .map(Option::unwrap_or_default)
        .map_err(|source| ApiError::Storage { message, source })
}

async fn store(
    state: &AppState,
    key: SelectionKey,
    value: String,
    message: &'static str,
) -> Result<Json<StatusResponse>, ApiError> {
    let store = state.store.clone();
    task::spawn_blocking(move || set_selection(&store, key, &value))
        .await
        .map_err(|source| ApiError::Task { message, source })?
        .map_err(|source| ApiError::Storage { message, source })?;
    Ok(Json(StatusResponse { status: "ok" }))
}
