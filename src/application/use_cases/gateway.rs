use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use phishnet_types::{AnalysisReport, SchemaError};
use thiserror::Error;
use url::Url;

use crate::{
    app_error::AppError,
    application::{
        clock::Clock,
        use_cases::session::{self, AuthRejection, SessionDecision},
        validators::{is_present, parse_target_url},
    },
    domain::entities::api_key::ApiKeyRecord,
};

/// External collaborator that produces a report for a URL.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, url: &Url) -> Result<AnalysisReport, AnalyzerError>;
}

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("analyzer did not respond within {0:?}")]
    Timeout(Duration),

    #[error("analyzer request failed: {0}")]
    Transport(String),

    #[error("analyzer returned a malformed response: {0}")]
    Malformed(String),

    #[error("analyzer response violates the report schema: {0}")]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    ValidationError(String),
    InvalidKey,
    KeyExpired,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("request rejected: {0:?}")]
    Rejected(RejectReason),

    #[error("{0}")]
    ExternalFailure(String),
}

impl From<AuthRejection> for RejectReason {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::InvalidKey => RejectReason::InvalidKey,
            AuthRejection::KeyExpired => RejectReason::KeyExpired,
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected(RejectReason::ValidationError(msg)) => {
                AppError::InvalidInput(msg)
            }
            GatewayError::Rejected(RejectReason::InvalidKey) => AppError::InvalidApiKey,
            GatewayError::Rejected(RejectReason::KeyExpired) => AppError::ApiKeyExpired,
            GatewayError::ExternalFailure(msg) => AppError::AnalysisFailed(msg),
        }
    }
}

/// Runs one analysis request: input validation, session check, bounded
/// analyzer call. Persists nothing.
pub struct AnalysisGateway {
    analyzer: Arc<dyn Analyzer>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl AnalysisGateway {
    pub fn new(analyzer: Arc<dyn Analyzer>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            analyzer,
            clock,
            timeout,
        }
    }

    pub async fn handle(
        &self,
        url: &str,
        presented_key: &str,
        snapshot: &[ApiKeyRecord],
    ) -> Result<AnalysisReport, GatewayError> {
        let target = validate_request(url, presented_key)?;

        if let SessionDecision::Reject(rejection) =
            session::validate(presented_key, snapshot, self.clock.now())
        {
            tracing::info!(?rejection, "Analysis request rejected");
            return Err(GatewayError::Rejected(rejection.into()));
        }

        let report = match tokio::time::timeout(self.timeout, self.analyzer.analyze(&target)).await
        {
            Ok(result) => result,
            Err(_) => Err(AnalyzerError::Timeout(self.timeout)),
        }
        .and_then(|report| {
            report.check_schema()?;
            Ok(report)
        })
        .map_err(|e| {
            tracing::warn!(error = %e, url = %target, "Analyzer call failed");
            GatewayError::ExternalFailure(e.to_string())
        })?;

        tracing::info!(url = %target, prediction = %report.prediction, "Analysis completed");
        Ok(report)
    }
}

fn validate_request(url: &str, presented_key: &str) -> Result<Url, GatewayError> {
    let mut problems = Vec::new();

    let target = if url.trim().is_empty() {
        problems.push("URL is required.");
        None
    } else {
        let parsed = parse_target_url(url);
        if parsed.is_none() {
            problems.push("Please enter a valid URL.");
        }
        parsed
    };

    if !is_present(presented_key) {
        problems.push("API Key is required.");
    }

    match target {
        Some(target) if problems.is_empty() => Ok(target),
        _ => Err(GatewayError::Rejected(RejectReason::ValidationError(
            problems.join(", "),
        ))),
    }
}
