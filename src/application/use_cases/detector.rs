use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::Mutex;

use crate::{
    app_error::AppResult,
    application::use_cases::{gateway::AnalysisGateway, history::HistoryStore, key_store::KeyStore},
    domain::entities::history::HistoryEntry,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DetectOutcome {
    /// Newest completed result; now the displayed one.
    Shown(HistoryEntry),
    /// A newer submission completed first. Still recorded in history.
    Stale(HistoryEntry),
}

impl DetectOutcome {
    pub fn entry(&self) -> &HistoryEntry {
        match self {
            DetectOutcome::Shown(entry) | DetectOutcome::Stale(entry) => entry,
        }
    }

    pub fn into_entry(self) -> HistoryEntry {
        match self {
            DetectOutcome::Shown(entry) | DetectOutcome::Stale(entry) => entry,
        }
    }
}

#[derive(Default)]
struct DisplayState {
    shown_ticket: u64,
    current: Option<HistoryEntry>,
}

/// Caller of the gateway: validates against a fresh key snapshot, records
/// successful results, and keeps the last-completed-wins display state.
pub struct Detector {
    gateway: Arc<AnalysisGateway>,
    key_store: Arc<KeyStore>,
    history: Arc<HistoryStore>,
    next_ticket: AtomicU64,
    display: Mutex<DisplayState>,
}

impl Detector {
    pub fn new(
        gateway: Arc<AnalysisGateway>,
        key_store: Arc<KeyStore>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            gateway,
            key_store,
            history,
            next_ticket: AtomicU64::new(1),
            display: Mutex::new(DisplayState::default()),
        }
    }

    pub async fn submit(&self, url: &str, presented_key: &str) -> AppResult<DetectOutcome> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst);

        let snapshot = self.key_store.snapshot().await?;
        let report = self.gateway.handle(url, presented_key, &snapshot).await?;
        let entry = self.history.append(url.trim(), presented_key, report).await?;

        let mut state = self.display.lock().await;
        if ticket < state.shown_ticket {
            tracing::debug!(ticket, shown = state.shown_ticket, "Discarding stale result");
            return Ok(DetectOutcome::Stale(entry));
        }
        state.shown_ticket = ticket;
        state.current = Some(entry.clone());
        Ok(DetectOutcome::Shown(entry))
    }

    /// The result currently on display, if any.
    pub async fn current(&self) -> Option<HistoryEntry> {
        self.display.lock().await.current.clone()
    }
}
