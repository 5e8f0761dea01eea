use chrono::{DateTime, Utc};

use crate::{application::use_cases::expiry, domain::entities::api_key::ApiKeyRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    InvalidKey,
    KeyExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDecision {
    Accept,
    Reject(AuthRejection),
}

/// Decides whether `presented_key` may be used at `now`.
///
/// Lookup is an exact, case-sensitive match against the snapshot; an unknown
/// key is rejected before expiry is considered.
pub fn validate(
    presented_key: &str,
    snapshot: &[ApiKeyRecord],
    now: DateTime<Utc>,
) -> SessionDecision {
    let Some(record) = snapshot.iter().find(|r| r.key == presented_key) else {
        return SessionDecision::Reject(AuthRejection::InvalidKey);
    };

    if expiry::is_expired(record, now) {
        return SessionDecision::Reject(AuthRejection::KeyExpired);
    }

    SessionDecision::Accept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_key, test_datetime};
    use chrono::TimeDelta;

    #[test]
    fn test_accepts_known_active_key() {
        let t0 = test_datetime();
        let snapshot = vec![create_test_key("testkey123", |k| k.expires_in = 3_600)];

        assert_eq!(
            validate("testkey123", &snapshot, t0 + TimeDelta::seconds(10)),
            SessionDecision::Accept
        );
    }

    #[test]
    fn test_rejects_unknown_key() {
        let snapshot = vec![create_test_key("testkey123", |_| {})];

        assert_eq!(
            validate("TESTKEY123", &snapshot, test_datetime()),
            SessionDecision::Reject(AuthRejection::InvalidKey)
        );
        assert_eq!(
            validate("testkey123", &[], test_datetime()),
            SessionDecision::Reject(AuthRejection::InvalidKey)
        );
    }

    #[test]
    fn test_rejects_expired_key() {
        let t0 = test_datetime();
        let snapshot = vec![create_test_key("testkey123", |k| k.expires_in = 3_600)];

        assert_eq!(
            validate("testkey123", &snapshot, t0 + TimeDelta::seconds(3_601)),
            SessionDecision::Reject(AuthRejection::KeyExpired)
        );
    }

    #[test]
    fn test_never_expiring_key_accepted_far_in_future() {
        let t0 = test_datetime();
        let snapshot = vec![create_test_key("testkey123", |k| k.expires_in = 0)];

        assert_eq!(
            validate("testkey123", &snapshot, t0 + TimeDelta::days(3_650)),
            SessionDecision::Accept
        );
    }
}
