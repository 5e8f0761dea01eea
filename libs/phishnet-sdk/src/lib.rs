//! Rust client for the PhishNet detection API.
//!
//! # Example
//!
//! ```rust,ignore
//! use phishnet_sdk::{PhishnetClient, PhishnetConfig};
//!
//! let client = PhishnetClient::new(PhishnetConfig {
//!     base_url: "http://127.0.0.1:3001".to_string(),
//!     api_key: "testkey123".to_string(),
//! })?;
//!
//! let report = client.detect("http://example-phishing-site.com/login").await?;
//! println!("{} ({:.0}%)", report.prediction, report.confidence_score * 100.0);
//! ```

mod client;
mod error;

pub use client::{PhishnetClient, PhishnetConfig};
pub use error::PhishnetError;

// Re-export shared types for convenience
pub use phishnet_types::{AnalysisReport, ErrorCode, Prediction};
