use crate::{
    adapters::{analyzer::GeminiAnalyzer, http::app_state::AppState},
    application::{
        clock::{Clock, SystemClock},
        ports::storage::KeyValueStore,
        use_cases::{
            detector::Detector, gateway::AnalysisGateway, history::HistoryStore,
            key_store::KeyStore,
        },
    },
    infra::{
        InfraError, config::AppConfig, http_client::try_build_client,
        memory_storage::MemoryStorage, redis_storage::RedisStorage,
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let storage: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(redis_url) => {
            Arc::new(RedisStorage::connect(redis_url, &config.storage_namespace).await?)
        }
        None => {
            tracing::info!("REDIS_URL not set, keeping state in process memory");
            Arc::new(MemoryStorage::new().viewer())
        }
    };

    let http_client = try_build_client().map_err(InfraError::HttpClient)?;
    let analyzer = Arc::new(GeminiAnalyzer::new(
        http_client,
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
    ));

    let key_store = Arc::new(KeyStore::open(storage.clone(), clock.clone()).await?);
    let history = Arc::new(HistoryStore::open(storage.clone(), clock.clone()).await?);
    let gateway = Arc::new(AnalysisGateway::new(
        analyzer,
        clock.clone(),
        config.analyzer_timeout,
    ));
    let detector = Arc::new(Detector::new(gateway, key_store.clone(), history.clone()));

    Ok(AppState {
        config: Arc::new(config),
        clock,
        storage,
        key_store,
        history,
        detector,
    })
}

pub fn init_tracing() -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "phishnet=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs)
    let file = File::create("app.log").map_err(InfraError::LogFile)?;
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
