use async_trait::async_trait;
use super::models::{LoginGrant, ScanSubmission, SummaryResult};
use super::outcome::RequestOutcome;

/// One operation per remote call the portal makes.
///
/// Implementations classify every result into a [`RequestOutcome`] and
/// never navigate.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Exchange credentials for a session token
    async fn login(&self, email: &str, password: &str) -> RequestOutcome<LoginGrant>;

    /// Queue a scan of `url` on behalf of the token holder
    async fn submit_scan(&self, url: &str, token: &str) -> RequestOutcome<ScanSubmission>;

    /// Fetch the summary text for a finished scan
    async fn fetch_summary(&self, scan_id: &str, token: &str) -> RequestOutcome<SummaryResult>;

    /// Base origin, for logging
    fn base_url(&self) -> &str;
}
