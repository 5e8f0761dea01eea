use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    application::use_cases::history::{ApiKeyFilter, PredictionFilter},
    domain::entities::history::HistoryEntry,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_history))
        .route("/", delete(clear_history))
        .route("/{id}", delete(delete_entry))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryQuery {
    #[serde(default)]
    prediction: PredictionFilter,
    api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    entries: Vec<HistoryEntry>,
    /// Keys selectable as a filter.
    api_keys: Vec<String>,
}

async fn list_history(
    State(app_state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<impl IntoResponse> {
    app_state.history.load().await?;

    let api_key = ApiKeyFilter::from_query(query.api_key.as_deref());
    let entries = app_state.history.filter(query.prediction, &api_key).await;

    Ok(Json(HistoryResponse {
        entries,
        api_keys: app_state.history.available_api_keys().await,
    }))
}

async fn delete_entry(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    app_state.history.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_history(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    app_state.history.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
