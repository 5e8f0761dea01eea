use serde::{Serialize, de::DeserializeOwned};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::storage::KeyValueStore,
};

const MAX_SNAPSHOT_LOG_LEN: usize = 200;

/// Reads a whole-array snapshot.
///
/// A missing key is an empty store. So is an unparsable one: corruption is
/// logged and swallowed so a damaged local cache never hard-fails a caller.
/// Only an unreachable store is an error.
pub async fn read_snapshot<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> AppResult<Vec<T>> {
    let Some(raw) = storage.get(key).await? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(err) => {
            let truncated: String = raw.chars().take(MAX_SNAPSHOT_LOG_LEN).collect();
            tracing::warn!(
                key,
                error = %err,
                raw = %truncated,
                "Corrupt snapshot in storage, treating as empty"
            );
            Ok(Vec::new())
        }
    }
}

/// Replaces the whole snapshot under `key`.
pub async fn write_snapshot<T: Serialize>(
    storage: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> AppResult<()> {
    let raw = serde_json::to_string(items).map_err(|e| AppError::Internal(e.to_string()))?;
    storage.set(key, &raw).await
}
