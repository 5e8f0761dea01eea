use std::{net::SocketAddr, time::Duration};

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

use crate::adapters::analyzer::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Shared store for every process in the namespace. Unset keeps state in memory.
    pub redis_url: Option<String>,
    pub storage_namespace: String,
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub gemini_base_url: Url,
    /// Upper bound on one analyzer call, on top of the HTTP client timeouts.
    pub analyzer_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .map_err(|e| anyhow::anyhow!("CORS_ORIGIN must be a valid header value: {e}"))?;

        let redis_url: Option<String> = std::env::var("REDIS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let storage_namespace: String =
            get_env_default("STORAGE_NAMESPACE", "phishnet".to_string());

        let gemini_api_key = SecretString::new(get_env::<String>("GEMINI_API_KEY").into());
        let gemini_model: String = get_env_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL.to_string());
        let gemini_base_url: Url = get_env_default(
            "GEMINI_BASE_URL",
            Url::parse(DEFAULT_GEMINI_BASE_URL)?,
        );
        let analyzer_timeout_secs: u64 = get_env_default("ANALYZER_TIMEOUT_SECS", 30);

        Ok(Self {
            bind_addr,
            cors_origin,
            redis_url,
            storage_namespace,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            analyzer_timeout: Duration::from_secs(analyzer_timeout_secs),
        })
    }
}
