use crate::errors::FailureKind;

/// Classified result of a single gateway call.
///
/// Every call resolves to exactly one variant; transport faults never
/// escape as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome<T> {
    Success(T),
    AuthRejected(String),
    ClientError(String),
    NetworkOrServerError(String),
}

impl<T> RequestOutcome<T> {
    /// The failure kind, or `None` on success.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            RequestOutcome::Success(_) => None,
            RequestOutcome::AuthRejected(_) => Some(FailureKind::AuthRejected),
            RequestOutcome::ClientError(_) => Some(FailureKind::ClientError),
            RequestOutcome::NetworkOrServerError(_) => Some(FailureKind::NetworkOrServerError),
        }
    }

    /// Stable name of the failure kind for structured logs.
    pub fn error_type(&self) -> &'static str {
        self.failure_kind()
            .map(|kind| kind.classify().error_type)
            .unwrap_or("None")
    }

    /// Diagnostic detail for logs. Never shown to the user.
    pub fn detail(&self) -> Option<&str> {
        match self {
            RequestOutcome::Success(_) => None,
            RequestOutcome::AuthRejected(m)
            | RequestOutcome::ClientError(m)
            | RequestOutcome::NetworkOrServerError(m) => Some(m),
        }
    }
}
