use std::path::{Path, PathBuf};
use std::sync::Arc;
use chrono::Duration;
use tracing::{debug, warn};
use crate::errors::PortalError;
use super::clock::{Clock, SystemClock};
use super::state::Session;
use super::store::SessionStore;

/// Session slot persisted as a small JSON file, the CLI's stand-in for a
/// browser cookie.
pub struct FileSessionStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw stored session, expired or not. Unreadable files count as
    /// absent.
    pub fn stored(&self) -> Option<Session> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return None;
            }
        };
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    fn write(&self, session: &Session) -> Result<(), PortalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), PortalError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), PortalError> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn save(&self, token: &str, ttl: Duration) -> Result<(), PortalError> {
        let session = Session::issue(token, self.clock.now(), ttl);
        self.write(&session)
            .map_err(|e| PortalError::Session(format!(
                "Failed to persist session to {}: {}", self.path.display(), e
            )))?;
        debug!(path = %self.path.display(), expires_at = %session.expires_at, "Session saved");
        Ok(())
    }

    fn read(&self) -> Option<String> {
        let session = self.stored()?;
        let token = session.live_token(self.clock.now()).map(str::to_string);
        if token.is_none() {
            debug!(expires_at = %session.expires_at, "Stored session has expired");
        }
        token
    }

    fn clear(&self) -> Result<(), PortalError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortalError::Session(format!(
                "Failed to remove session file {}: {}", self.path.display(), e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::clock::ManualClock;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> (FileSessionStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()));
        let store = FileSessionStore::with_clock(dir.path().join("nested/session.json"), clock.clone());
        (store, clock)
    }

    #[test]
    fn test_missing_file_reads_absent() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store_in(&dir);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_save_creates_parent_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store_in(&dir);
        store.save("t1", Duration::days(1)).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.read().as_deref(), Some("t1"));
    }

    #[test]
    fn test_session_survives_new_store_instance() {
        let dir = TempDir::new().unwrap();
        let (store, clock) = store_in(&dir);
        store.save("t1", Duration::days(1)).unwrap();

        let reopened = FileSessionStore::with_clock(store.path().to_path_buf(), clock);
        assert_eq!(reopened.read().as_deref(), Some("t1"));
    }

    #[test]
    fn test_expired_file_is_ignored_not_deleted() {
        let dir = TempDir::new().unwrap();
        let (store, clock) = store_in(&dir);
        store.save("t1", Duration::days(1)).unwrap();
        clock.advance(Duration::days(2));
        assert_eq!(store.read(), None);
        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_file_reads_absent() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let (store, _) = store_in(&dir);
        store.save("t1", Duration::days(1)).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.read(), None);
        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let (store, _) = store_in(&dir);
        store.save("t1", Duration::days(1)).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
