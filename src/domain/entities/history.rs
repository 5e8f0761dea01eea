use chrono::{DateTime, SecondsFormat, Utc};
use phishnet_types::AnalysisReport;
use serde::{Deserialize, Serialize};

/// One past analysis as persisted under `analysisHistory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub api_key: String,
    pub result: AnalysisReport,
}

/// Timestamp-derived id with a random suffix, so entries appended within
/// the same millisecond stay distinct.
pub fn history_entry_id(now: DateTime<Utc>) -> String {
    let suffix = hex::encode(rand::random::<[u8; 4]>());
    format!("{}-{suffix}", now.to_rfc3339_opts(SecondsFormat::Millis, true))
}
