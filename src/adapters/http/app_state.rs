use std::sync::Arc;

use crate::{
    application::{
        clock::Clock,
        ports::storage::KeyValueStore,
        use_cases::{detector::Detector, history::HistoryStore, key_store::KeyStore},
    },
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub clock: Arc<dyn Clock>,
    pub storage: Arc<dyn KeyValueStore>,
    pub key_store: Arc<KeyStore>,
    pub history: Arc<HistoryStore>,
    pub detector: Arc<Detector>,
}
