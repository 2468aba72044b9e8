use serde::{Deserialize, Serialize};

/// Shown when the API returns no summary text for a scan.
pub const NO_SUMMARY_TEXT: &str = "No summary available.";

// Wire bodies

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScanRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ScanRequestResponse {
    #[serde(rename = "redirectUrl")]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    #[serde(rename = "Summary")]
    pub summary: Option<String>,
}

// Classified payloads

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub expires_in_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSubmission {
    pub redirect_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub text: String,
}

impl SummaryResult {
    /// Missing or empty summary text collapses to the sentinel.
    pub fn from_optional(text: Option<String>) -> Self {
        match text {
            Some(t) if !t.is_empty() => Self { text: t },
            _ => Self { text: NO_SUMMARY_TEXT.to_string() },
        }
    }
}
