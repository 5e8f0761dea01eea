use axum::{Router, http};
use http::header::CONTENT_TYPE;
use phishnet_types::API_KEY_HEADER;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::adapters::{self, http::app_state::AppState};

pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::DELETE])
        .allow_headers([CONTENT_TYPE, http::HeaderName::from_static(API_KEY_HEADER)]);

    Router::new()
        .nest("/api", adapters::http::routes::router())
        .with_state(app_state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http-request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                    request_id = %request_id
                )
            }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::test_utils::{TestAppStateBuilder, create_test_key};

    #[tokio::test]
    async fn routes_are_nested_under_api_with_security_headers() {
        let (app_state, _storage) = TestAppStateBuilder::new().build();
        let server = TestServer::new(create_app(app_state)).unwrap();

        let response = server.get("/api/version").await;

        response.assert_status_ok();
        assert_eq!(response.header("x-content-type-options"), "nosniff");
        assert_eq!(response.header("x-frame-options"), "DENY");
    }

    #[tokio::test]
    async fn key_created_over_http_authorizes_detect() {
        let (app_state, _storage) = TestAppStateBuilder::new()
            .with_key(create_test_key("seededkey1", |_| {}))
            .build();
        let server = TestServer::new(create_app(app_state)).unwrap();

        server
            .post("/api/keys")
            .json(&json!({ "key": "freshkey99", "expiresIn": 0 }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/detect")
            .add_header(
                HeaderName::from_static(API_KEY_HEADER),
                HeaderValue::from_static("freshkey99"),
            )
            .json(&json!({ "url": "https://example.com" }))
            .await;
        response.assert_status_ok();

        let history = server.get("/api/history").await.json::<serde_json::Value>();
        assert_eq!(history["entries"][0]["apiKey"], "freshkey99");
        assert_eq!(history["apiKeys"], json!(["seededkey1", "freshkey99"]));
    }
}
