use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::{
    app_error::AppResult,
    application::ports::storage::{ExternalChanges, StorageEvent},
};

/// An in-memory view over one or more storage keys that can be refreshed
/// when another viewer writes them.
#[async_trait]
pub trait SnapshotView: Send + Sync {
    fn name(&self) -> &'static str;

    fn storage_keys(&self) -> &'static [&'static str];

    async fn reload(&self) -> AppResult<()>;
}

/// Reloads `view` if `event` touches one of its keys. Returns whether it did.
pub async fn on_external_change(view: &dyn SnapshotView, event: &StorageEvent) -> AppResult<bool> {
    if !view.storage_keys().iter().any(|key| event.touches(key)) {
        return Ok(false);
    }

    view.reload().await?;
    tracing::debug!(view = view.name(), key = %event.key, origin = %event.origin, "View reloaded");
    Ok(true)
}

/// Keeps `views` in step with writes from other viewers until the store goes away.
pub fn spawn_external_sync(
    mut changes: ExternalChanges,
    views: Vec<Arc<dyn SnapshotView>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = changes.next().await {
            for view in &views {
                if let Err(e) = on_external_change(view.as_ref(), &event).await {
                    tracing::warn!(view = view.name(), error = %e, "Failed to reload view");
                }
            }
        }
        tracing::info!("Storage change stream ended");
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        application::{
            ports::storage::{ANY_KEY, API_KEYS_KEY, HISTORY_KEY, KeyValueStore, ViewerId},
            use_cases::{history::HistoryStore, key_store::KeyStore},
        },
        infra::memory_storage::MemoryStorage,
        test_utils::{FixedClock, create_test_report, test_datetime},
    };

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(test_datetime()))
    }

    #[tokio::test]
    async fn reloads_only_views_watching_the_key() {
        let storage = MemoryStorage::new();
        let keys = KeyStore::new(Arc::new(storage.viewer()), clock());
        let history = HistoryStore::new(Arc::new(storage.viewer()), clock());
        let other = ViewerId::new();

        let event = StorageEvent::new(HISTORY_KEY, other);
        assert!(!on_external_change(&keys, &event).await.unwrap());
        assert!(on_external_change(&history, &event).await.unwrap());

        let event = StorageEvent::new(API_KEYS_KEY, other);
        assert!(on_external_change(&keys, &event).await.unwrap());
        assert!(on_external_change(&history, &event).await.unwrap());

        let event = StorageEvent::new(ANY_KEY, other);
        assert!(on_external_change(&keys, &event).await.unwrap());

        let event = StorageEvent::new("unrelated", other);
        assert!(!on_external_change(&history, &event).await.unwrap());
    }

    #[tokio::test]
    async fn foreign_write_reaches_other_viewer() {
        let storage = MemoryStorage::new();
        let tab_a = HistoryStore::new(Arc::new(storage.viewer()), clock());

        let b_storage = storage.viewer();
        let changes = b_storage.subscribe();
        let tab_b = Arc::new(HistoryStore::new(Arc::new(b_storage), clock()));
        let handle = spawn_external_sync(changes, vec![tab_b.clone() as Arc<dyn SnapshotView>]);

        tab_a
            .append("https://a.example", "k", create_test_report(|_| {}))
            .await
            .unwrap();

        let mut seen = false;
        for _ in 0..50 {
            if tab_b.entries().await.len() == 1 {
                seen = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(seen, "tab B never observed tab A's append");

        handle.abort();
    }

    #[tokio::test]
    async fn own_writes_do_not_trigger_reload() {
        let storage = MemoryStorage::new();
        let view = storage.viewer();
        let mut changes = view.subscribe();
        let store = KeyStore::new(Arc::new(view), clock());

        store.create("testkey123", None, 0).await.unwrap();

        assert_eq!(changes.try_next(), None);
    }
}
