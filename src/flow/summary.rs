use std::sync::Arc;
use tracing::{info, warn};
use crate::errors::FailureKind;
use crate::gateway::{GatewayClient, RequestOutcome};
use crate::session::SessionStore;
use super::navigator::{Destination, Navigator};

pub const MISSING_TOKEN_MESSAGE: &str = "Authentication token is missing.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load summary.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    Loading,
    Loaded(String),
    Failed(&'static str),
}

/// Loads and displays the summary for one scan.
pub struct SummaryController {
    gateway: Arc<dyn GatewayClient>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: SummaryState,
    failure: Option<FailureKind>,
}

impl SummaryController {
    pub fn new(
        gateway: Arc<dyn GatewayClient>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            session,
            navigator,
            state: SummaryState::Loading,
            failure: None,
        }
    }

    pub fn state(&self) -> &SummaryState {
        &self.state
    }

    /// Kind of failure behind a `Failed` state.
    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Called whenever navigation parameters resolve. Nothing is fetched
    /// until a scan id is present.
    pub async fn activate(&mut self, scan_id: Option<&str>) -> &SummaryState {
        let Some(scan_id) = scan_id.filter(|id| !id.is_empty()) else {
            return &self.state;
        };

        let Some(token) = self.session.read() else {
            info!(
                scan_id = %scan_id,
                error_type = FailureKind::MissingSession.classify().error_type,
                "No session for summary view, redirecting to login"
            );
            self.state = SummaryState::Failed(MISSING_TOKEN_MESSAGE);
            self.failure = Some(FailureKind::MissingSession);
            self.navigator.navigate(Destination::Login);
            return &self.state;
        };

        self.state = SummaryState::Loading;
        self.failure = None;
        self.state = match self.gateway.fetch_summary(scan_id, &token).await {
            RequestOutcome::Success(summary) => SummaryState::Loaded(summary.text),
            other => {
                warn!(
                    scan_id = %scan_id,
                    error_type = other.error_type(),
                    detail = other.detail().unwrap_or_default(),
                    "Failed to load summary"
                );
                self.failure = other.failure_kind();
                SummaryState::Failed(LOAD_FAILED_MESSAGE)
            }
        };
        &self.state
    }

    /// "Back to results": pop the navigation history.
    pub fn back(&self) -> Option<Destination> {
        self.navigator.back()
    }
}
