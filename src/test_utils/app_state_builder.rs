//! Test app state builder for HTTP-level integration testing.
//!
//! `TestAppStateBuilder` creates an `AppState` over a fresh `MemoryStorage`
//! with a fixed clock and a stub analyzer.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use phishnet_types::AnalysisReport;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        ports::storage::API_KEYS_KEY,
        use_cases::{
            detector::Detector,
            gateway::{AnalysisGateway, Analyzer},
            history::HistoryStore,
            key_store::KeyStore,
        },
    },
    domain::entities::api_key::ApiKeyRecord,
    infra::{config::AppConfig, memory_storage::MemoryStorage},
    test_utils::{FixedClock, StubAnalyzer, create_test_report, test_datetime},
};

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        redis_url: None,
        storage_namespace: "phishnet-test".to_string(),
        gemini_api_key: SecretString::new("test_gemini_key".into()),
        gemini_model: "test-model".to_string(),
        gemini_base_url: Url::parse("http://127.0.0.1:9/").unwrap(),
        analyzer_timeout: Duration::from_secs(5),
    }
}

pub struct TestAppStateBuilder {
    keys: Vec<ApiKeyRecord>,
    analyzer: Option<Arc<dyn Analyzer>>,
    report: AnalysisReport,
    now: DateTime<Utc>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            analyzer: None,
            report: create_test_report(|_| {}),
            now: test_datetime(),
        }
    }

    /// Seed a key into storage before the stores are built.
    pub fn with_key(mut self, record: ApiKeyRecord) -> Self {
        self.keys.push(record);
        self
    }

    /// Report returned by the default stub analyzer.
    pub fn with_report(mut self, report: AnalysisReport) -> Self {
        self.report = report;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Returns the state and the storage backing it, for raw assertions.
    pub fn build(self) -> (AppState, MemoryStorage) {
        let storage = MemoryStorage::new();
        if !self.keys.is_empty() {
            storage.put_raw(API_KEYS_KEY, &serde_json::to_string(&self.keys).unwrap());
        }

        let config = test_config();
        let clock = Arc::new(FixedClock::new(self.now));
        let view = Arc::new(storage.viewer());
        let analyzer = self
            .analyzer
            .unwrap_or_else(|| Arc::new(StubAnalyzer::new(self.report)) as Arc<dyn Analyzer>);

        let key_store = Arc::new(KeyStore::new(view.clone(), clock.clone()));
        let history = Arc::new(HistoryStore::new(view.clone(), clock.clone()));
        let gateway = Arc::new(AnalysisGateway::new(
            analyzer,
            clock.clone(),
            config.analyzer_timeout,
        ));
        let detector = Arc::new(Detector::new(gateway, key_store.clone(), history.clone()));

        let app_state = AppState {
            config: Arc::new(config),
            clock,
            storage: view,
            key_store,
            history,
            detector,
        };
        (app_state, storage)
    }
}
