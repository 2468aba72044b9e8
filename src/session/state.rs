use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The client-held record of an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(token: &str, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: token.to_string(),
            expires_at: now + ttl,
        }
    }

    /// A session is usable up to, but not including, its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// The token, if the session is still live at `now`.
    pub fn live_token(&self, now: DateTime<Utc>) -> Option<&str> {
        if self.is_expired(now) || self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }
}
