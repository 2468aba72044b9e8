use serde::Serialize;

/// Closed set of reasons a portal action can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The API refused the supplied credentials.
    AuthRejected,
    /// No session token, or the stored one has expired.
    MissingSession,
    /// A 2xx response that does not honor the API contract.
    ClientError,
    /// Transport failure or an unclassified server response.
    NetworkOrServerError,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl FailureKind {
    /// Classify this failure to determine its type and whether the user can
    /// simply try again.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            FailureKind::NetworkOrServerError => ErrorClassification {
                error_type: "NetworkOrServerError",
                retryable: true,
            },
            FailureKind::AuthRejected => ErrorClassification {
                error_type: "AuthRejectedError",
                retryable: false,
            },
            FailureKind::MissingSession => ErrorClassification {
                error_type: "MissingSessionError",
                retryable: false,
            },
            FailureKind::ClientError => ErrorClassification {
                error_type: "ClientError",
                retryable: false,
            },
        }
    }

    /// Whether recovering requires a fresh login.
    pub fn requires_login(&self) -> bool {
        matches!(self, FailureKind::MissingSession)
    }
}
