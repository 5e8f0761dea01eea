//! PhishNet client implementation.

use url::Url;

use crate::error::PhishnetError;

/// Configuration for the PhishNet client.
#[derive(Debug, Clone)]
pub struct PhishnetConfig {
    /// Where the service is reachable (e.g., "http://127.0.0.1:3001")
    pub base_url: String,

    /// The API key sent in the `x-api-key` header
    pub api_key: String,
}

/// PhishNet client for submitting URLs to the detection endpoint.
pub struct PhishnetClient {
    base_url: Url,
    api_key: String,
    #[cfg(feature = "client")]
    http_client: reqwest::Client,
}

impl PhishnetClient {
    /// Create a new PhishNet client.
    ///
    /// Fails when the API key is empty or the base URL does not parse.
    pub fn new(config: PhishnetConfig) -> Result<Self, PhishnetError> {
        if config.api_key.trim().is_empty() {
            return Err(PhishnetError::Config("apiKey is required".into()));
        }

        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| PhishnetError::Config(format!("invalid base url: {e}")))?;

        Ok(Self {
            base_url,
            api_key: config.api_key,
            #[cfg(feature = "client")]
            http_client: reqwest::Client::new(),
        })
    }

    /// Absolute URL of an API path such as `detect`.
    pub fn endpoint(&self, path: &str) -> Result<Url, PhishnetError> {
        self.base_url
            .join("api/")
            .and_then(|api| api.join(path))
            .map_err(|e| PhishnetError::Config(e.to_string()))
    }

    /// Submit a URL for analysis.
    ///
    /// # Returns
    /// The analysis report, or the API's error code and message.
    #[cfg(feature = "client")]
    pub async fn detect(&self, url: &str) -> Result<phishnet_types::AnalysisReport, PhishnetError> {
        use phishnet_types::{API_KEY_HEADER, DetectRequest};

        let response = self
            .http_client
            .post(self.endpoint("detect")?)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&DetectRequest {
                url: url.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch the service version string.
    #[cfg(feature = "client")]
    pub async fn version(&self) -> Result<String, PhishnetError> {
        #[derive(serde::Deserialize)]
        struct VersionResponse {
            version: String,
        }

        let response = self.http_client.get(self.endpoint("version")?).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let data: VersionResponse = response.json().await?;
        Ok(data.version)
    }
}

#[cfg(feature = "client")]
async fn api_error(response: reqwest::Response) -> PhishnetError {
    use phishnet_types::{ErrorBody, ErrorCode};

    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => PhishnetError::ApiError {
            code: body.code,
            message: body.message.unwrap_or_else(|| status.to_string()),
        },
        Err(_) => PhishnetError::ApiError {
            code: ErrorCode::InternalError,
            message: format!("Request failed: {status}"),
        },
    }
}
