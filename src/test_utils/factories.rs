//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use phishnet_types::{
    ActionableRecommendations, AnalysisReport, DetailedAnalysis, DomainReputation, HttpsCheck,
    Prediction, ReputationStatus, SecurityChecklist, SslCertificateCheck, ThreatCategorization,
    ThreatCategory, UserAction,
};

use crate::{application::clock::Clock, domain::entities::api_key::ApiKeyRecord};

/// Fixed instant used as "now" and as the default creation time.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

/// Create a personal key created at `test_datetime()` that expires in a day.
pub fn create_test_key(key: &str, overrides: impl FnOnce(&mut ApiKeyRecord)) -> ApiKeyRecord {
    let mut record = ApiKeyRecord::new(key, None, test_datetime(), 86_400);
    overrides(&mut record);
    record
}

/// Create a legitimate, low-risk report.
pub fn create_test_report(overrides: impl FnOnce(&mut AnalysisReport)) -> AnalysisReport {
    let mut report = AnalysisReport {
        prediction: Prediction::Legitimate,
        confidence_score: 0.92,
        overall_assessment: "Well-known domain served over HTTPS.".to_string(),
        threat_categorization: ThreatCategorization {
            category: ThreatCategory::Benign,
            description: "No indicators of abuse.".to_string(),
        },
        detailed_analysis: DetailedAnalysis {
            domain_analysis: "Established registrable domain.".to_string(),
            subdomain_analysis: "None.".to_string(),
            path_analysis: "Root path.".to_string(),
            character_analysis: "No homoglyphs or unusual characters.".to_string(),
        },
        security_checklist: SecurityChecklist {
            uses_https: HttpsCheck {
                value: true,
                assessment: "Served over HTTPS.".to_string(),
            },
            ssl_certificate: SslCertificateCheck {
                valid: true,
                assessment: "Certificate appears valid.".to_string(),
            },
            domain_reputation: DomainReputation {
                status: ReputationStatus::Good,
                assessment: "Widely recognised brand.".to_string(),
            },
        },
        actionable_recommendations: ActionableRecommendations {
            user_action: UserAction::SafeToProceed,
            security_tip: "Check the address bar before signing in.".to_string(),
        },
    };
    overrides(&mut report);
    report
}

/// Clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
