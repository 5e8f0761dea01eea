use std::sync::Arc;

use async_trait::async_trait;
use phishnet_types::{AnalysisReport, Prediction};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::{
    app_error::AppResult,
    application::{
        clock::Clock,
        ports::storage::{API_KEYS_KEY, HISTORY_KEY, KeyValueStore},
        use_cases::{
            snapshot::{read_snapshot, write_snapshot},
            sync::SnapshotView,
        },
    },
    domain::entities::{
        api_key::ApiKeyRecord,
        history::{HistoryEntry, history_entry_id},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionFilter {
    #[default]
    All,
    Phishing,
    Legitimate,
}

impl PredictionFilter {
    fn matches(&self, prediction: Prediction) -> bool {
        match self {
            PredictionFilter::All => true,
            PredictionFilter::Phishing => prediction == Prediction::Phishing,
            PredictionFilter::Legitimate => prediction == Prediction::Legitimate,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ApiKeyFilter {
    #[default]
    All,
    Key(String),
}

impl ApiKeyFilter {
    /// `None`, an empty value and the literal `all` select every key.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some("all") => ApiKeyFilter::All,
            Some(key) => ApiKeyFilter::Key(key.to_string()),
        }
    }

    fn matches(&self, api_key: &str) -> bool {
        match self {
            ApiKeyFilter::All => true,
            ApiKeyFilter::Key(key) => key == api_key,
        }
    }
}

/// Newest-first log of completed analyses.
///
/// Mutations write this viewer's in-memory view back without re-reading
/// storage first. Two viewers appending from stale views lose one of the
/// appends; whichever writes last wins the whole blob.
pub struct HistoryStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    entries: RwLock<Vec<HistoryEntry>>,
    api_keys: RwLock<Vec<ApiKeyRecord>>,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            entries: RwLock::new(Vec::new()),
            api_keys: RwLock::new(Vec::new()),
        }
    }

    pub async fn open(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let store = Self::new(storage, clock);
        store.load().await?;
        Ok(store)
    }

    /// Replaces both views (history and the key filter list) from storage.
    ///
    /// Both locks are held across the reads so a local append cannot land
    /// between the read and the swap and then be overwritten.
    pub async fn load(&self) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let mut api_keys = self.api_keys.write().await;

        *entries = read_snapshot(self.storage.as_ref(), HISTORY_KEY).await?;
        *api_keys = read_snapshot(self.storage.as_ref(), API_KEYS_KEY).await?;
        Ok(())
    }

    pub async fn append(
        &self,
        url: &str,
        api_key: &str,
        report: AnalysisReport,
    ) -> AppResult<HistoryEntry> {
        let entry = HistoryEntry {
            id: history_entry_id(self.clock.now()),
            url: url.to_string(),
            api_key: api_key.to_string(),
            result: report,
        };

        let mut entries = self.entries.write().await;
        let mut updated = Vec::with_capacity(entries.len() + 1);
        updated.push(entry.clone());
        updated.extend(entries.iter().cloned());
        write_snapshot(self.storage.as_ref(), HISTORY_KEY, &updated).await?;
        *entries = updated;

        tracing::debug!(id = %entry.id, len = entries.len(), "History entry appended");
        Ok(entry)
    }

    /// Removes one entry. An unknown id is a no-op.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let remaining: Vec<HistoryEntry> =
            entries.iter().filter(|e| e.id != id).cloned().collect();
        if remaining.len() == before {
            return Ok(());
        }

        write_snapshot(self.storage.as_ref(), HISTORY_KEY, &remaining).await?;
        *entries = remaining;
        Ok(())
    }

    /// Drops every entry and the stored key itself.
    pub async fn clear(&self) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        self.storage.remove(HISTORY_KEY).await?;
        entries.clear();
        tracing::info!("History cleared");
        Ok(())
    }

    pub async fn filter(
        &self,
        prediction: PredictionFilter,
        api_key: &ApiKeyFilter,
    ) -> Vec<HistoryEntry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| prediction.matches(e.result.prediction) && api_key.matches(&e.api_key))
            .cloned()
            .collect()
    }

    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.clone()
    }

    /// Keys offered as history filters, as of the last reload.
    pub async fn available_api_keys(&self) -> Vec<String> {
        self.api_keys
            .read()
            .await
            .iter()
            .map(|r| r.key.clone())
            .collect()
    }
}

#[async_trait]
impl SnapshotView for HistoryStore {
    fn name(&self) -> &'static str {
        "history"
    }

    fn storage_keys(&self) -> &'static [&'static str] {
        &[HISTORY_KEY, API_KEYS_KEY]
    }

    async fn reload(&self) -> AppResult<()> {
        self.load().await
    }
}
