//! Deterministic `Analyzer` implementations.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use phishnet_types::AnalysisReport;
use url::Url;

use crate::application::use_cases::gateway::{Analyzer, AnalyzerError};

/// Returns the same report for every URL and counts calls.
pub struct StubAnalyzer {
    report: AnalysisReport,
    calls: AtomicUsize,
}

impl StubAnalyzer {
    pub fn new(report: AnalysisReport) -> Self {
        Self {
            report,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Analyzer for StubAnalyzer {
    async fn analyze(&self, _url: &Url) -> Result<AnalysisReport, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.report.clone())
    }
}

/// Always fails with a transport error.
pub struct FailingAnalyzer {
    message: String,
}

impl FailingAnalyzer {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl Analyzer for FailingAnalyzer {
    async fn analyze(&self, _url: &Url) -> Result<AnalysisReport, AnalyzerError> {
        Err(AnalyzerError::Transport(self.message.clone()))
    }
}

/// Never answers within any reasonable timeout.
pub struct SlowAnalyzer {
    delay: Duration,
}

impl SlowAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Analyzer for SlowAnalyzer {
    async fn analyze(&self, _url: &Url) -> Result<AnalysisReport, AnalyzerError> {
        tokio::time::sleep(self.delay).await;
        Err(AnalyzerError::Transport("slow analyzer gave up".into()))
    }
}

/// Answers with `report` after a per-host delay (no delay for unlisted hosts).
pub struct DelayByHostAnalyzer {
    report: AnalysisReport,
    delays: HashMap<String, Duration>,
}

impl DelayByHostAnalyzer {
    pub fn new<const N: usize>(report: AnalysisReport, delays: [(&str, Duration); N]) -> Self {
        Self {
            report,
            delays: delays
                .into_iter()
                .map(|(host, delay)| (host.to_string(), delay))
                .collect(),
        }
    }
}

#[async_trait]
impl Analyzer for DelayByHostAnalyzer {
    async fn analyze(&self, url: &Url) -> Result<AnalysisReport, AnalyzerError> {
        if let Some(delay) = url.host_str().and_then(|host| self.delays.get(host)) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.report.clone())
    }
}
