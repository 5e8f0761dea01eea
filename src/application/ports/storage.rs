use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use uuid::Uuid;

use crate::app_error::AppResult;

/// Storage key holding the JSON array of API key records.
pub const API_KEYS_KEY: &str = "apiKeys";

/// Storage key holding the newest-first JSON array of history entries.
pub const HISTORY_KEY: &str = "analysisHistory";

/// Key carried by the synthetic event emitted after missed notifications.
pub const ANY_KEY: &str = "*";

/// Identifies one viewer (tab, process) attached to a shared store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewerId(Uuid);

impl ViewerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ViewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A key was written or removed by `origin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEvent {
    pub key: String,
    pub origin: ViewerId,
}

impl StorageEvent {
    pub fn new(key: impl Into<String>, origin: ViewerId) -> Self {
        Self {
            key: key.into(),
            origin,
        }
    }

    pub fn touches(&self, key: &str) -> bool {
        self.key == key || self.key == ANY_KEY
    }
}

/// Whole-value key-value storage shared between viewers.
///
/// Values are opaque strings replaced in full on every write. Writes are
/// announced to every other viewer through `subscribe`; the writer itself is
/// never notified of its own changes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    fn viewer_id(&self) -> ViewerId;

    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Changes made by other viewers from now on.
    fn subscribe(&self) -> ExternalChanges;

    /// Cheap reachability check for health reporting.
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Receiving end of a storage change subscription, filtered to foreign writes.
pub struct ExternalChanges {
    rx: broadcast::Receiver<StorageEvent>,
    viewer: ViewerId,
}

impl ExternalChanges {
    pub fn new(rx: broadcast::Receiver<StorageEvent>, viewer: ViewerId) -> Self {
        Self { rx, viewer }
    }

    /// Waits for the next foreign change. `None` once the store is gone.
    ///
    /// Missed notifications collapse into a single `ANY_KEY` event so the
    /// subscriber reloads everything instead of silently drifting.
    pub async fn next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.origin == self.viewer => continue,
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, viewer = %self.viewer, "Storage notifications lagged");
                    return Some(StorageEvent::new(ANY_KEY, self.viewer));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of `next`.
    pub fn try_next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if event.origin == self.viewer => continue,
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, viewer = %self.viewer, "Storage notifications lagged");
                    return Some(StorageEvent::new(ANY_KEY, self.viewer));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
