use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::domain::entities::api_key::ApiKeyRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Active,
    Expired,
    Never,
}

impl ExpiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Active => "active",
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::Never => "never",
        }
    }
}

/// When the record stops being valid; `None` for keys that never expire.
///
/// A lifetime too large to represent is treated as never reached.
pub fn expires_at(record: &ApiKeyRecord) -> Option<DateTime<Utc>> {
    if record.expires_in == 0 {
        return None;
    }
    i64::try_from(record.expires_in)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|lifetime| record.created_at.checked_add_signed(lifetime))
}

/// Expired strictly after `created_at + expires_in`; the boundary instant is
/// still active.
pub fn status(record: &ApiKeyRecord, now: DateTime<Utc>) -> ExpiryStatus {
    if record.expires_in == 0 {
        return ExpiryStatus::Never;
    }
    match expires_at(record) {
        Some(deadline) if now > deadline => ExpiryStatus::Expired,
        _ => ExpiryStatus::Active,
    }
}

pub fn is_expired(record: &ApiKeyRecord, now: DateTime<Utc>) -> bool {
    status(record, now) == ExpiryStatus::Expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_key, test_datetime};

    #[test]
    fn test_active_until_deadline_then_expired() {
        let t0 = test_datetime();
        let rec = create_test_key("testkey123", |k| {
            k.created_at = t0;
            k.expires_in = 3_600;
        });

        assert_eq!(status(&rec, t0), ExpiryStatus::Active);
        assert_eq!(status(&rec, t0 + TimeDelta::seconds(3_599)), ExpiryStatus::Active);
        assert_eq!(status(&rec, t0 + TimeDelta::seconds(3_600)), ExpiryStatus::Active);
        assert_eq!(status(&rec, t0 + TimeDelta::seconds(3_601)), ExpiryStatus::Expired);
        assert!(is_expired(&rec, t0 + TimeDelta::days(30)));
    }

    #[test]
    fn test_zero_never_expires() {
        let t0 = test_datetime();
        let rec = create_test_key("testkey123", |k| {
            k.created_at = t0;
            k.expires_in = 0;
        });

        assert_eq!(status(&rec, t0), ExpiryStatus::Never);
        assert_eq!(status(&rec, t0 + TimeDelta::days(36_500)), ExpiryStatus::Never);
        assert_eq!(expires_at(&rec), None);
    }

    #[test]
    fn test_expires_at() {
        let t0 = test_datetime();
        let rec = create_test_key("testkey123", |k| {
            k.created_at = t0;
            k.expires_in = 86_400;
        });

        assert_eq!(expires_at(&rec), Some(t0 + TimeDelta::days(1)));
    }

    #[test]
    fn test_unrepresentable_lifetime_stays_active() {
        let t0 = test_datetime();
        let rec = create_test_key("testkey123", |k| {
            k.created_at = t0;
            k.expires_in = u64::MAX;
        });

        assert_eq!(expires_at(&rec), None);
        assert_eq!(status(&rec, t0 + TimeDelta::days(36_500)), ExpiryStatus::Active);
    }
}
