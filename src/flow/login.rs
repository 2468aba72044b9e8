use std::sync::Arc;
use chrono::Duration;
use tracing::{debug, error, info, warn};
use crate::config::credentials::{mask_token, redact_credentials};
use crate::gateway::{GatewayClient, RequestOutcome};
use crate::session::SessionStore;
use super::navigator::{Destination, Navigator};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const LOGIN_RETRY_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Idle { error: Option<&'static str> },
    Submitting,
    Redirecting(Destination),
}

/// Drives the login form: credentials in, session saved, landing page out.
pub struct LoginController {
    gateway: Arc<dyn GatewayClient>,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    state: LoginState,
}

impl LoginController {
    pub fn new(
        gateway: Arc<dyn GatewayClient>,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            session,
            navigator,
            state: LoginState::Idle { error: None },
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn error(&self) -> Option<&'static str> {
        match self.state {
            LoginState::Idle { error } => error,
            _ => None,
        }
    }

    /// Inputs and the submit button are only live while idle.
    pub fn is_form_enabled(&self) -> bool {
        matches!(self.state, LoginState::Idle { .. })
    }

    pub async fn submit(&mut self, email: &str, password: &str) -> &LoginState {
        if !self.is_form_enabled() {
            warn!(state = ?self.state, "Ignoring login submit while form is disabled");
            return &self.state;
        }

        let mut busy = Busy::enter(&mut self.state);
        let outcome = self.gateway.login(email, password).await;

        busy.settle(match outcome {
            RequestOutcome::Success(grant) => {
                let ttl = Duration::days(i64::from(grant.expires_in_days));
                match self.session.save(&grant.token, ttl) {
                    Ok(()) => {
                        info!(email = %email, token = %mask_token(&grant.token), "Logged in");
                        self.navigator.navigate(Destination::Landing);
                        LoginState::Redirecting(Destination::Landing)
                    }
                    Err(e) => {
                        error!(error = %e, "Could not store session after login");
                        LoginState::Idle { error: Some(LOGIN_RETRY_MESSAGE) }
                    }
                }
            }
            RequestOutcome::AuthRejected(_) => {
                info!(email = %email, "Credentials rejected");
                LoginState::Idle { error: Some(INVALID_CREDENTIALS_MESSAGE) }
            }
            other => {
                let detail = other.detail().unwrap_or_default();
                warn!(
                    error_type = other.error_type(),
                    detail = %redact_credentials(detail, &[password]),
                    "Login failed"
                );
                LoginState::Idle { error: Some(LOGIN_RETRY_MESSAGE) }
            }
        });
        drop(busy);
        &self.state
    }
}

/// Holds the form disabled while a login call is outstanding. Dropping the
/// submit future mid-call re-enables the form without an error.
struct Busy<'a> {
    state: &'a mut LoginState,
}

impl<'a> Busy<'a> {
    fn enter(state: &'a mut LoginState) -> Self {
        *state = LoginState::Submitting;
        Self { state }
    }

    fn settle(&mut self, next: LoginState) {
        *self.state = next;
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        if matches!(self.state, LoginState::Submitting) {
            debug!("Login abandoned, re-enabling form");
            *self.state = LoginState::Idle { error: None };
        }
    }
}
