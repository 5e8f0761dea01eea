//! Shared wire types for the PhishNet detection API.
//!
//! This crate provides:
//! - The `AnalysisReport` schema returned by `POST /api/detect`
//! - The detect request body
//! - API error codes and the JSON error body

mod errors;
mod report;
mod requests;

pub use errors::{ErrorBody, ErrorCode, SchemaError};
pub use report::{
    ActionableRecommendations, AnalysisReport, DetailedAnalysis, DomainReputation,
    HttpsCheck, Prediction, ReputationStatus, SecurityChecklist, SslCertificateCheck,
    ThreatCategorization, ThreatCategory, UserAction,
};
pub use requests::DetectRequest;

/// Header carrying the presented API key on detect requests.
pub const API_KEY_HEADER: &str = "x-api-key";
