use std::sync::{Arc, RwLock};
use chrono::Duration;
use tracing::debug;
use crate::errors::PortalError;
use super::clock::{Clock, SystemClock};
use super::state::Session;

/// Persisted slot holding the current auth token.
///
/// `read` never returns an expired token. Expired entries are left in place
/// and simply ignored; the backing storage may drop them whenever it likes.
pub trait SessionStore: Send + Sync {
    /// Persist `token` until `now + ttl`, replacing any prior session.
    fn save(&self, token: &str, ttl: Duration) -> Result<(), PortalError>;

    /// The live token, or `None` when absent or expired.
    fn read(&self) -> Option<String>;

    /// Remove the token unconditionally.
    fn clear(&self) -> Result<(), PortalError>;
}

/// In-process session slot.
pub struct MemorySessionStore {
    slot: RwLock<Option<Session>>,
    clock: Arc<dyn Clock>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            clock,
        }
    }

    /// The raw stored session, expired or not.
    pub fn stored(&self) -> Option<Session> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, token: &str, ttl: Duration) -> Result<(), PortalError> {
        let session = Session::issue(token, self.clock.now(), ttl);
        debug!(expires_at = %session.expires_at, "Session saved in memory");
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Ok(())
    }

    fn read(&self) -> Option<String> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .and_then(|s| s.live_token(self.clock.now()))
            .map(str::to_string)
    }

    fn clear(&self) -> Result<(), PortalError> {
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    fn store_with_clock() -> (MemorySessionStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()));
        (MemorySessionStore::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_read_empty_store() {
        let (store, _) = store_with_clock();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_save_then_read() {
        let (store, _) = store_with_clock();
        store.save("t1", Duration::days(1)).unwrap();
        assert_eq!(store.read().as_deref(), Some("t1"));
    }

    #[test]
    fn test_save_overwrites_previous() {
        let (store, _) = store_with_clock();
        store.save("t1", Duration::days(1)).unwrap();
        store.save("t2", Duration::days(1)).unwrap();
        assert_eq!(store.read().as_deref(), Some("t2"));
    }

    #[test]
    fn test_expired_token_reads_absent_but_is_kept() {
        let (store, clock) = store_with_clock();
        store.save("t1", Duration::days(1)).unwrap();
        clock.advance(Duration::days(1) + Duration::seconds(1));
        assert_eq!(store.read(), None);
        assert_eq!(store.stored().map(|s| s.token).as_deref(), Some("t1"));
    }

    #[test]
    fn test_clear_removes_token() {
        let (store, _) = store_with_clock();
        store.save("t1", Duration::days(1)).unwrap();
        store.clear().unwrap();
        assert_eq!(store.read(), None);
        assert!(store.stored().is_none());
    }
}
