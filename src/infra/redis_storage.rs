use async_trait::async_trait;
use futures::StreamExt;
use redis::{AsyncCommands, aio::ConnectionManager};
use tokio::sync::broadcast;

use super::InfraError;
use crate::{
    app_error::{AppError, AppResult},
    application::ports::storage::{ExternalChanges, KeyValueStore, StorageEvent, ViewerId},
};

const EVENT_CAPACITY: usize = 64;

/// Redis-backed shared store. Each process attached to the same namespace is
/// one viewer; writes are announced on `<namespace>:changes`.
#[derive(Clone)]
pub struct RedisStorage {
    manager: ConnectionManager,
    namespace: String,
    viewer: ViewerId,
    events: broadcast::Sender<StorageEvent>,
}

impl RedisStorage {
    pub async fn connect(redis_url: &str, namespace: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client.clone())
            .await
            .map_err(InfraError::RedisConnection)?;

        let channel = changes_channel(namespace);
        let mut pubsub = client
            .get_async_pubsub()
            .await
            .map_err(InfraError::RedisConnection)?;
        pubsub
            .subscribe(&channel)
            .await
            .map_err(InfraError::RedisConnection)?;

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        tokio::spawn(forward_notifications(pubsub, events.clone()));

        let viewer = ViewerId::new();
        tracing::info!(%viewer, namespace, "Attached to shared redis storage");

        Ok(Self {
            manager,
            namespace: namespace.to_string(),
            viewer,
            events,
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{key}", self.namespace)
    }

    async fn notify(&self, key: &str) -> AppResult<()> {
        let payload = serde_json::to_string(&StorageEvent::new(key, self.viewer))
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let mut conn = self.manager.clone();
        let _: i64 = conn
            .publish(changes_channel(&self.namespace), payload)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

fn changes_channel(namespace: &str) -> String {
    format!("{namespace}:changes")
}

fn storage_error(e: redis::RedisError) -> AppError {
    AppError::Storage(e.to_string())
}

/// Runs `write` and, if it changed something, `announce`.
///
/// Only the write decides the result. Once it has landed a failed
/// announcement is logged, since other viewers still converge on their
/// next reload.
async fn write_then_announce<W, A, F>(key: &str, write: W, announce: A) -> AppResult<()>
where
    W: Future<Output = AppResult<bool>>,
    A: FnOnce() -> F,
    F: Future<Output = AppResult<()>>,
{
    if !write.await? {
        return Ok(());
    }
    if let Err(e) = announce().await {
        tracing::warn!(key, error = %e, "Stored change but failed to announce it");
    }
    Ok(())
}

async fn forward_notifications(pubsub: redis::aio::PubSub, events: broadcast::Sender<StorageEvent>) {
    let mut messages = pubsub.into_on_message();
    while let Some(msg) = messages.next().await {
        let payload: String = match msg.get_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable storage notification");
                continue;
            }
        };
        match serde_json::from_str::<StorageEvent>(&payload) {
            Ok(event) => {
                let _ = events.send(event);
            }
            Err(e) => tracing::warn!(error = %e, "Malformed storage notification"),
        }
    }
    tracing::warn!("Storage notification stream closed");
}

#[async_trait]
impl KeyValueStore for RedisStorage {
    fn viewer_id(&self) -> ViewerId {
        self.viewer
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        conn.get(self.key(key)).await.map_err(storage_error)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let stored_key = self.key(key);
        let write = async move {
            let _: () = conn.set(stored_key, value).await.map_err(storage_error)?;
            Ok::<_, AppError>(true)
        };
        write_then_announce(key, write, || self.notify(key)).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let stored_key = self.key(key);
        let write = async move {
            let removed: i64 = conn.del(stored_key).await.map_err(storage_error)?;
            Ok::<_, AppError>(removed > 0)
        };
        write_then_announce(key, write, || self.notify(key)).await
    }

    fn subscribe(&self) -> ExternalChanges {
        ExternalChanges::new(self.events.subscribe(), self.viewer)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let _pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}
