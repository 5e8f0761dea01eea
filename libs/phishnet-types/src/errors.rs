use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error codes returned by PhishNet endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    InvalidApiKey,
    ApiKeyExpired,
    DuplicateKey,
    AnalysisFailed,
    StorageError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::ApiKeyExpired => "API_KEY_EXPIRED",
            Self::DuplicateKey => "DUPLICATE_KEY",
            Self::AnalysisFailed => "ANALYSIS_FAILED",
            Self::StorageError => "STORAGE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A report that deserialized but violates the documented constraints.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("confidenceScore {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serde() {
        let code = ErrorCode::ApiKeyExpired;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, r#""API_KEY_EXPIRED""#);

        let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
        assert_eq!(code.to_string(), "API_KEY_EXPIRED");
    }

    #[test]
    fn test_error_body_omits_missing_message() {
        let body = ErrorBody {
            code: ErrorCode::InternalError,
            message: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"code":"INTERNAL_ERROR"}"#
        );
    }
}
