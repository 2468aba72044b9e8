use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use crate::config::ProgressConfig;
use crate::errors::FailureKind;
use crate::gateway::{GatewayClient, RequestOutcome, ScanSubmission};
use crate::session::SessionStore;
use super::navigator::{Destination, Navigator};
use super::progress::{ProgressTicker, PROGRESS_COMPLETE};

pub const MISSING_REDIRECT_MESSAGE: &str = "Redirect URL is missing in the response.";
pub const SUBMISSION_ERROR_MESSAGE: &str = "An error occurred during scan submission.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Idle { error: Option<&'static str> },
    Submitting,
    /// Request accepted; holding at 100% before redirecting.
    Completing,
    Redirecting(String),
}

/// Drives the scan-submission form.
pub struct ScanController {
    gateway: Arc<dyn GatewayClient>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    cadence: ProgressConfig,
    progress: Arc<watch::Sender<u8>>,
    state: ScanState,
    failure: Option<FailureKind>,
}

impl ScanController {
    pub fn new(
        gateway: Arc<dyn GatewayClient>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        cadence: ProgressConfig,
    ) -> Self {
        let (progress, _) = watch::channel(0u8);
        Self {
            gateway,
            session,
            navigator,
            cadence,
            progress: Arc::new(progress),
            state: ScanState::Idle { error: None },
            failure: None,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn error(&self) -> Option<&'static str> {
        match self.state {
            ScanState::Idle { error } => error,
            _ => None,
        }
    }

    /// Kind of the most recent failure, cleared by the next submit.
    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn progress(&self) -> u8 {
        *self.progress.borrow()
    }

    /// Observe progress updates, e.g. to drive a progress bar.
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    pub fn is_form_enabled(&self) -> bool {
        matches!(self.state, ScanState::Idle { .. })
    }

    /// Page entry. Returns false (after redirecting to login) when there is
    /// no live session.
    pub fn activate(&mut self) -> bool {
        if self.session.read().is_none() {
            info!(
                error_type = FailureKind::MissingSession.classify().error_type,
                "No session on scan page entry, redirecting to login"
            );
            self.failure = Some(FailureKind::MissingSession);
            self.navigator.navigate(Destination::Login);
            return false;
        }
        true
    }

    pub async fn submit(&mut self, url: &str) -> &ScanState {
        if !self.is_form_enabled() {
            warn!(state = ?self.state, "Ignoring duplicate scan submission");
            return &self.state;
        }

        self.progress.send_replace(0);
        self.failure = None;

        // The session may have lapsed since the page was opened.
        let Some(token) = self.session.read() else {
            info!(
                error_type = FailureKind::MissingSession.classify().error_type,
                "Session missing at submit time, redirecting to login"
            );
            self.state = ScanState::Idle { error: None };
            self.failure = Some(FailureKind::MissingSession);
            self.navigator.navigate(Destination::Login);
            return &self.state;
        };

        let mut busy = Busy::enter(&mut self.state, &self.progress);
        let ticker = ProgressTicker::start(self.progress.clone(), &self.cadence);
        let outcome = self.gateway.submit_scan(url, &token).await;
        ticker.stop().await;

        match outcome {
            RequestOutcome::Success(ScanSubmission { redirect_location: Some(location) })
                if !location.is_empty() =>
            {
                self.progress.send_replace(PROGRESS_COMPLETE);
                busy.set(ScanState::Completing);
                info!(target_url = %url, redirect = %location, "Scan request accepted");

                tokio::time::sleep(Duration::from_millis(self.cadence.completion_hold_ms)).await;

                self.navigator.navigate(Destination::External(location.clone()));
                busy.set(ScanState::Redirecting(location));
            }
            RequestOutcome::Success(_) | RequestOutcome::ClientError(_) => {
                warn!(target_url = %url, "Scan accepted without a redirect location");
                self.failure = Some(FailureKind::ClientError);
                busy.fail(MISSING_REDIRECT_MESSAGE);
            }
            other => {
                warn!(
                    target_url = %url,
                    error_type = other.error_type(),
                    detail = other.detail().unwrap_or_default(),
                    "Scan submission failed"
                );
                self.failure = other.failure_kind();
                busy.fail(SUBMISSION_ERROR_MESSAGE);
            }
        }
        drop(busy);
        &self.state
    }
}

/// Owns the controller state for the length of one submission. If the submit
/// future is dropped before it settles, the form returns to idle with
/// progress at 0.
struct Busy<'a> {
    state: &'a mut ScanState,
    progress: &'a watch::Sender<u8>,
}

impl<'a> Busy<'a> {
    fn enter(state: &'a mut ScanState, progress: &'a watch::Sender<u8>) -> Self {
        *state = ScanState::Submitting;
        Self { state, progress }
    }

    fn set(&mut self, next: ScanState) {
        *self.state = next;
    }

    fn fail(&mut self, message: &'static str) {
        self.progress.send_replace(0);
        *self.state = ScanState::Idle { error: Some(message) };
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        if matches!(self.state, ScanState::Submitting | ScanState::Completing) {
            debug!("Scan submission abandoned, re-enabling form");
            self.progress.send_replace(0);
            *self.state = ScanState::Idle { error: None };
        }
    }
}
