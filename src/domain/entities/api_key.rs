use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expiry presets offered when creating or importing a key, in seconds.
pub const EXPIRY_PRESETS: [(u64, &str); 4] = [
    (3_600, "1 Hour"),
    (86_400, "1 Day"),
    (604_800, "7 Days"),
    (0, "Never"),
];

pub const DEFAULT_EXPIRES_IN: u64 = 86_400;

/// A user-chosen API key as persisted under `apiKeys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRecord {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing_code: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Lifetime in seconds; 0 never expires.
    pub expires_in: u64,
}

impl ApiKeyRecord {
    pub fn new(
        key: impl Into<String>,
        sharing_code: Option<String>,
        created_at: DateTime<Utc>,
        expires_in: u64,
    ) -> Self {
        Self {
            key: key.into(),
            sharing_code: sharing_code.filter(|code| !code.trim().is_empty()),
            created_at,
            expires_in,
        }
    }

    pub fn is_shared(&self) -> bool {
        self.sharing_code.is_some()
    }

    pub fn label(&self) -> &'static str {
        if self.is_shared() { "Shared" } else { "Personal" }
    }

    /// `abcd...wxyz` form used wherever the key is listed.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.key.chars().collect();
        if chars.len() <= 8 {
            return self.key.clone();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}
