use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    application::use_cases::expiry::{self, ExpiryStatus},
    domain::entities::api_key::{ApiKeyRecord, DEFAULT_EXPIRES_IN, EXPIRY_PRESETS},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_keys))
        .route("/", post(create_key))
        .route("/import", post(import_key))
        .route("/presets", get(list_presets))
        .route("/{key}", delete(delete_key))
}

fn default_expires_in() -> u64 {
    DEFAULT_EXPIRES_IN
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateKeyPayload {
    key: String,
    #[serde(default)]
    sharing_code: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportKeyPayload {
    key: String,
    #[serde(default)]
    sharing_code: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyResponse {
    key: String,
    masked: String,
    label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sharing_code: Option<String>,
    created_at: DateTime<Utc>,
    expires_in: u64,
    expires_at: Option<DateTime<Utc>>,
    status: ExpiryStatus,
}

impl KeyResponse {
    fn new(record: ApiKeyRecord, now: DateTime<Utc>) -> Self {
        Self {
            masked: record.masked(),
            label: record.label(),
            expires_at: expiry::expires_at(&record),
            status: expiry::status(&record, now),
            key: record.key,
            sharing_code: record.sharing_code,
            created_at: record.created_at,
            expires_in: record.expires_in,
        }
    }
}

async fn list_keys(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let now = app_state.clock.now();
    let keys: Vec<KeyResponse> = app_state
        .key_store
        .load()
        .await?
        .into_iter()
        .map(|record| KeyResponse::new(record, now))
        .collect();
    Ok(Json(keys))
}

async fn create_key(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateKeyPayload>,
) -> AppResult<impl IntoResponse> {
    let record = app_state
        .key_store
        .create(
            &payload.key,
            payload.sharing_code.as_deref(),
            payload.expires_in,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(KeyResponse::new(record, app_state.clock.now())),
    ))
}

async fn import_key(
    State(app_state): State<AppState>,
    Json(payload): Json<ImportKeyPayload>,
) -> AppResult<impl IntoResponse> {
    let record = app_state
        .key_store
        .import(&payload.key, &payload.sharing_code, payload.expires_in)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(KeyResponse::new(record, app_state.clock.now())),
    ))
}

async fn delete_key(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    app_state.key_store.delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetResponse {
    expires_in: u64,
    label: &'static str,
    default: bool,
}

async fn list_presets() -> impl IntoResponse {
    let presets: Vec<PresetResponse> = EXPIRY_PRESETS
        .iter()
        .map(|&(expires_in, label)| PresetResponse {
            expires_in,
            label,
            default: expires_in == DEFAULT_EXPIRES_IN,
        })
        .collect();
    Json(presets)
}
