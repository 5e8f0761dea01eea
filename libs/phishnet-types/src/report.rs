use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;

/// Final verdict of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Phishing,
    Legitimate,
}

impl Prediction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phishing => "phishing",
            Self::Legitimate => "legitimate",
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of threat the analyzer attributes to a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatCategory {
    #[serde(rename = "Credential Harvesting")]
    CredentialHarvesting,
    #[serde(rename = "Malware Delivery")]
    MalwareDelivery,
    #[serde(rename = "Social Engineering")]
    SocialEngineering,
    #[serde(rename = "Financial Scam")]
    FinancialScam,
    Benign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReputationStatus {
    Good,
    Neutral,
    Poor,
    Unknown,
}

/// The course of action recommended to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserAction {
    #[serde(rename = "Do Not Proceed")]
    DoNotProceed,
    #[serde(rename = "Proceed with Caution")]
    ProceedWithCaution,
    #[serde(rename = "Safe to Proceed")]
    SafeToProceed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatCategorization {
    pub category: ThreatCategory,
    pub description: String,
}

/// Breakdown of the URL's components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub domain_analysis: String,
    pub subdomain_analysis: String,
    pub path_analysis: String,
    pub character_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpsCheck {
    pub value: bool,
    pub assessment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SslCertificateCheck {
    pub valid: bool,
    pub assessment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainReputation {
    pub status: ReputationStatus,
    pub assessment: String,
}

/// Checklist of critical security indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityChecklist {
    pub uses_https: HttpsCheck,
    pub ssl_certificate: SslCertificateCheck,
    pub domain_reputation: DomainReputation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionableRecommendations {
    pub user_action: UserAction,
    pub security_tip: String,
}

/// Structured phishing-risk report produced by the analyzer.
///
/// The service passes this through unchanged; it only guarantees the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub prediction: Prediction,
    /// Confidence of the prediction, between 0.0 and 1.0.
    pub confidence_score: f64,
    /// One-sentence summary of the findings.
    pub overall_assessment: String,
    pub threat_categorization: ThreatCategorization,
    pub detailed_analysis: DetailedAnalysis,
    pub security_checklist: SecurityChecklist,
    pub actionable_recommendations: ActionableRecommendations,
}

impl AnalysisReport {
    /// Checks the constraints serde cannot express.
    pub fn check_schema(&self) -> Result<(), SchemaError> {
        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(SchemaError::ConfidenceOutOfRange(self.confidence_score));
        }
        Ok(())
    }

    pub fn is_phishing(&self) -> bool {
        self.prediction == Prediction::Phishing
    }
}
