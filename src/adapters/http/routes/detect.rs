use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::post,
};
use phishnet_types::{API_KEY_HEADER, DetectRequest};

use crate::{adapters::http::app_state::AppState, app_error::AppResult};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(detect))
}

/// A missing or non-UTF-8 header is treated as an empty key.
fn presented_key(headers: &HeaderMap) -> &str {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn detect(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DetectRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = app_state
        .detector
        .submit(&payload.url, presented_key(&headers))
        .await?;

    Ok(Json(outcome.into_entry().result))
}
