use async_trait::async_trait;
use phishnet_types::AnalysisReport;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::application::use_cases::gateway::{Analyzer, AnalyzerError};

/// Default endpoint of the generative language API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Analyzer backed by Gemini `generateContent` with a JSON response.
#[derive(Clone)]
pub struct GeminiAnalyzer {
    client: Client,
    base_url: Url,
    model: String,
    api_key: SecretString,
}

impl GeminiAnalyzer {
    pub fn new(client: Client, base_url: Url, model: String, api_key: SecretString) -> Self {
        Self {
            client,
            base_url,
            model,
            api_key,
        }
    }

    fn endpoint(&self) -> Result<Url, AnalyzerError> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| AnalyzerError::Transport(format!("invalid analyzer endpoint: {e}")))
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

fn request_body(url: &Url) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": detection_prompt(url) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json"
        }
    })
}

/// Extracts the report from the first candidate's text part.
fn parse_report(body: &str) -> Result<AnalysisReport, AnalyzerError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| AnalyzerError::Malformed(e.to_string()))?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .ok_or_else(|| AnalyzerError::Malformed("response has no candidate text".into()))?;

    let report: AnalysisReport = serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| AnalyzerError::Malformed(e.to_string()))?;
    report.check_schema()?;
    Ok(report)
}

// Models occasionally wrap JSON in a markdown fence despite the mime type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, url: &Url) -> Result<AnalysisReport, AnalyzerError> {
        let resp = self
            .client
            .post(self.endpoint()?)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request_body(url))
            .send()
            .await
            .map_err(|e| AnalyzerError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AnalyzerError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            tracing::warn!(%status, body = %snippet, model = %self.model, "Analyzer returned an error");
            return Err(AnalyzerError::Transport(format!("analyzer responded with {status}")));
        }

        parse_report(&body)
    }
}

fn detection_prompt(url: &Url) -> String {
    format!(
        r#"You are a world-class cybersecurity analyst AI, specializing in the forensic analysis of URLs to detect sophisticated phishing attempts. Your analysis must be exceptionally detailed, providing deep insights and actionable advice.

Analyze the URL: {url}

Based on your comprehensive analysis, generate a structured JSON output with the following highly detailed fields:

- prediction: Your final verdict ("phishing" or "legitimate").
- confidenceScore: A score from 0.0 to 1.0 representing your confidence.
- overallAssessment: A concise, one-sentence executive summary of your findings.
- threatCategorization:
  - category: Classify the threat ('Credential Harvesting', 'Malware Delivery', 'Social Engineering', 'Financial Scam', or 'Benign').
  - description: The specific evidence within the URL that supports your classification.
- detailedAnalysis:
  - domainAnalysis: Likely age of the domain, the TLD's common usage, and any misspellings or impersonations of well-known brands.
  - subdomainAnalysis: Brand names, random character strings, or excessive subdomains designed to obscure the true domain.
  - pathAnalysis: Suspicious file extensions (.zip, .exe), directory names that mimic legitimate services ('/login/', '/account/verify/'), or long, obfuscated paths.
  - characterAnalysis: Punycode (IDN homograph attacks), excessive hyphens or dots, and special characters used to deceive users.
- securityChecklist:
  - usesHttps: {{ "value": boolean, "assessment": string }}. Note that HTTPS does not guarantee safety.
  - sslCertificate: {{ "valid": boolean, "assessment": string }}. Simulate this check; assume true for HTTPS sites unless other factors are highly suspicious.
  - domainReputation: {{ "status": "good" | "neutral" | "poor" | "unknown", "assessment": string }}. Simulate this check based on URL patterns.
- actionableRecommendations:
  - userAction: 'Do Not Proceed', 'Proceed with Caution', or 'Safe to Proceed'.
  - securityTip: A practical security tip based on the findings.

Respond with the JSON object only."#
    )
}
