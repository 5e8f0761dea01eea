use serde::{Deserialize, Serialize};

/// Body of `POST /api/detect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectRequest {
    /// The complete URL to analyze.
    pub url: String,
}
