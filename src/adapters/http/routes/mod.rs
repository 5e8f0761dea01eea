pub mod detect;
pub mod history;
pub mod keys;
pub mod status;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/detect", detect::router())
        .nest("/keys", keys::router())
        .nest("/history", history::router())
        .merge(status::router())
}
