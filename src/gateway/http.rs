use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use crate::config::ApiConfig;
use crate::errors::PortalError;
use super::client::GatewayClient;
use super::models::{
    LoginGrant, LoginRequest, LoginResponse, ScanRequest, ScanRequestResponse, ScanSubmission,
    SummaryResponse, SummaryResult,
};
use super::outcome::RequestOutcome;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Gateway over the portal's REST API.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    session_ttl_days: u32,
}

impl HttpGateway {
    pub fn new(base_url: &str, user_agent: &str, session_ttl_days: u32) -> Result<Self, PortalError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| PortalError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_ttl_days,
        })
    }

    pub fn from_config(api: &ApiConfig, session_ttl_days: u32) -> Result<Self, PortalError> {
        Self::new(&api.base_url, &api.user_agent, session_ttl_days)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a 2xx body. Parse failures are transport-level faults.
async fn read_json<T: DeserializeOwned>(resp: Response, op: &str) -> Result<T, String> {
    resp.json::<T>().await
        .map_err(|e| format!("Failed to parse {} response: {}", op, e))
}

/// Non-2xx on an authenticated call.
fn classify_status<T>(status: StatusCode, op: &str) -> RequestOutcome<T> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            warn!(op, status = status.as_u16(), "Token rejected by API");
            RequestOutcome::AuthRejected(format!("{} rejected the session token (HTTP {})", op, status.as_u16()))
        }
        _ => {
            warn!(op, status = status.as_u16(), "API returned an error status");
            RequestOutcome::NetworkOrServerError(format!("{} returned HTTP {}", op, status.as_u16()))
        }
    }
}

#[async_trait]
impl GatewayClient for HttpGateway {
    async fn login(&self, email: &str, password: &str) -> RequestOutcome<LoginGrant> {
        debug!(email = %email, "Sending login request");
        let resp = match self.client
            .post(self.endpoint("/api/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Login request failed");
                return RequestOutcome::NetworkOrServerError(format!("Login request failed: {}", e));
            }
        };

        let status = resp.status();
        if status == StatusCode::BAD_REQUEST {
            return RequestOutcome::AuthRejected(INVALID_CREDENTIALS.to_string());
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Login returned an error status");
            return RequestOutcome::NetworkOrServerError(format!("Login returned HTTP {}", status.as_u16()));
        }

        let body: LoginResponse = match read_json(resp, "login").await {
            Ok(b) => b,
            Err(e) => return RequestOutcome::NetworkOrServerError(e),
        };
        match body.token {
            Some(token) if !token.is_empty() => RequestOutcome::Success(LoginGrant {
                token,
                expires_in_days: self.session_ttl_days,
            }),
            _ => RequestOutcome::ClientError("Login response has no token".into()),
        }
    }

    async fn submit_scan(&self, url: &str, token: &str) -> RequestOutcome<ScanSubmission> {
        debug!(target_url = %url, "Submitting scan request");
        let resp = match self.client
            .post(self.endpoint("/api/scan-requests"))
            .bearer_auth(token)
            .json(&ScanRequest { url })
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Scan request failed");
                return RequestOutcome::NetworkOrServerError(format!("Scan request failed: {}", e));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            return classify_status(status, "Scan request");
        }

        let body: ScanRequestResponse = match read_json(resp, "scan request").await {
            Ok(b) => b,
            Err(e) => return RequestOutcome::NetworkOrServerError(e),
        };
        match body.redirect_url {
            Some(location) if !location.is_empty() => RequestOutcome::Success(ScanSubmission {
                redirect_location: Some(location),
            }),
            _ => RequestOutcome::ClientError("Redirect URL is missing in the response".into()),
        }
    }

    async fn fetch_summary(&self, scan_id: &str, token: &str) -> RequestOutcome<SummaryResult> {
        debug!(scan_id = %scan_id, "Fetching scan summary");
        let resp = match self.client
            .get(self.endpoint("/api/scanners/summary"))
            .query(&[("scanId", scan_id)])
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Summary request failed");
                return RequestOutcome::NetworkOrServerError(format!("Summary request failed: {}", e));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            return classify_status(status, "Summary request");
        }

        match read_json::<SummaryResponse>(resp, "summary").await {
            Ok(body) => RequestOutcome::Success(SummaryResult::from_optional(body.summary)),
            Err(e) => RequestOutcome::NetworkOrServerError(e),
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
