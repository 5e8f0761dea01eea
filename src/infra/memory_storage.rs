use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::storage::{ExternalChanges, KeyValueStore, StorageEvent, ViewerId},
};

const EVENT_CAPACITY: usize = 64;

struct Shared {
    entries: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
}

/// Process-local shared store. Every `viewer()` is an independent handle onto
/// the same entries, the way tabs share one browser profile.
#[derive(Clone)]
pub struct MemoryStorage {
    shared: Arc<Shared>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                entries: RwLock::new(HashMap::new()),
                events,
            }),
        }
    }

    pub fn viewer(&self) -> MemoryStorageView {
        MemoryStorageView {
            shared: self.shared.clone(),
            viewer: ViewerId::new(),
        }
    }

    /// Raw stored value, bypassing every viewer (for assertions and seeding).
    pub fn raw(&self, key: &str) -> Option<String> {
        self.shared
            .entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Writes a raw value without notifying anyone.
    pub fn put_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.shared.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MemoryStorageView {
    shared: Arc<Shared>,
    viewer: ViewerId,
}

impl MemoryStorageView {
    fn notify(&self, key: &str) {
        // No subscribers is fine.
        let _ = self.shared.events.send(StorageEvent::new(key, self.viewer));
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Storage("memory storage lock poisoned".into())
}

#[async_trait]
impl KeyValueStore for MemoryStorageView {
    fn viewer_id(&self) -> ViewerId {
        self.viewer
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.shared.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let changed = {
            let mut entries = self.shared.entries.write().map_err(poisoned)?;
            let previous = entries.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        };
        if changed {
            self.notify(key);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let removed = {
            let mut entries = self.shared.entries.write().map_err(poisoned)?;
            entries.remove(key).is_some()
        };
        if removed {
            self.notify(key);
        }
        Ok(())
    }

    fn subscribe(&self) -> ExternalChanges {
        ExternalChanges::new(self.shared.events.subscribe(), self.viewer)
    }
}
