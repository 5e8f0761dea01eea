use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        clock::Clock,
        ports::storage::{API_KEYS_KEY, KeyValueStore},
        use_cases::{
            snapshot::{read_snapshot, write_snapshot},
            sync::SnapshotView,
        },
    },
    domain::entities::api_key::ApiKeyRecord,
};

pub const MIN_CREATED_KEY_LEN: usize = 8;

/// The durable list of API keys plus this viewer's in-memory copy of it.
///
/// Every mutation re-reads the stored snapshot first, so the duplicate check
/// and the write see what other viewers have persisted. The read-then-write
/// itself is not atomic.
pub struct KeyStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    records: RwLock<Vec<ApiKeyRecord>>,
}

impl KeyStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Builds the store and loads the persisted snapshot.
    pub async fn open(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let store = Self::new(storage, clock);
        store.load().await?;
        Ok(store)
    }

    /// Replaces the in-memory view with the persisted snapshot.
    pub async fn load(&self) -> AppResult<Vec<ApiKeyRecord>> {
        let mut records = self.records.write().await;
        *records = read_snapshot(self.storage.as_ref(), API_KEYS_KEY).await?;
        Ok(records.clone())
    }

    /// Writes the in-memory view as the new snapshot.
    pub async fn persist(&self) -> AppResult<()> {
        let records = self.records.read().await;
        write_snapshot(self.storage.as_ref(), API_KEYS_KEY, &records).await
    }

    /// Latest persisted records, for validation.
    pub async fn snapshot(&self) -> AppResult<Vec<ApiKeyRecord>> {
        self.load().await
    }

    /// Records in insertion order, as last loaded.
    pub async fn list(&self) -> Vec<ApiKeyRecord> {
        self.records.read().await.clone()
    }

    /// Create a new key chosen by the user.
    pub async fn create(
        &self,
        key: &str,
        sharing_code: Option<&str>,
        expires_in: u64,
    ) -> AppResult<ApiKeyRecord> {
        if key.chars().count() < MIN_CREATED_KEY_LEN {
            return Err(AppError::InvalidInput(format!(
                "API Key must be at least {MIN_CREATED_KEY_LEN} characters long."
            )));
        }

        let record = self.insert(key, sharing_code.map(str::to_string), expires_in).await?;
        tracing::info!(key = %record.masked(), expires_in, "API key created");
        Ok(record)
    }

    /// Import a key someone shared, together with its sharing code.
    pub async fn import(
        &self,
        key: &str,
        sharing_code: &str,
        expires_in: u64,
    ) -> AppResult<ApiKeyRecord> {
        let mut problems = Vec::new();
        if key.trim().is_empty() {
            problems.push("API Key is required.");
        }
        if sharing_code.trim().is_empty() {
            problems.push("Sharing Code is required.");
        }
        if !problems.is_empty() {
            return Err(AppError::InvalidInput(problems.join(", ")));
        }

        let record = self.insert(key, Some(sharing_code.to_string()), expires_in).await?;
        tracing::info!(key = %record.masked(), expires_in, "API key imported");
        Ok(record)
    }

    /// Remove a key. Removing an absent key is not an error and writes nothing.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut records = self.records.write().await;
        *records = read_snapshot(self.storage.as_ref(), API_KEYS_KEY).await?;

        let before = records.len();
        records.retain(|r| r.key != key);
        if records.len() == before {
            return Ok(());
        }

        write_snapshot(self.storage.as_ref(), API_KEYS_KEY, &records).await?;
        tracing::info!("API key deleted");
        Ok(())
    }

    async fn insert(
        &self,
        key: &str,
        sharing_code: Option<String>,
        expires_in: u64,
    ) -> AppResult<ApiKeyRecord> {
        let mut records = self.records.write().await;
        *records = read_snapshot(self.storage.as_ref(), API_KEYS_KEY).await?;

        if records.iter().any(|r| r.key == key) {
            return Err(AppError::DuplicateKey);
        }

        let record = ApiKeyRecord::new(key, sharing_code, self.clock.now(), expires_in);
        let mut updated = records.clone();
        updated.push(record.clone());
        write_snapshot(self.storage.as_ref(), API_KEYS_KEY, &updated).await?;
        *records = updated;

        Ok(record)
    }
}

#[async_trait]
impl SnapshotView for KeyStore {
    fn name(&self) -> &'static str {
        "api_keys"
    }

    fn storage_keys(&self) -> &'static [&'static str] {
        &[API_KEYS_KEY]
    }

    async fn reload(&self) -> AppResult<()> {
        self.load().await.map(|_| ())
    }
}
