//! Session file I/O.
//!
//! Reads and writes `~/.traq/session.json` with secure file permissions
//! (0o600).

use std::path::{Path, PathBuf};

use crate::errors::AuthError;
use crate::types::{SessionStorage, STORAGE_VERSION};

/// Default session file name.
const SESSION_FILE_NAME: &str = "session.json";

/// Get the session file path under the given data directory.
pub fn session_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Load the stored session from file (sync).
///
/// Returns `None` if the file doesn't exist or is invalid.
pub fn load_session(path: &Path) -> Option<SessionStorage> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("failed to read session file: {e}");
            return None;
        }
    };

    match serde_json::from_str::<SessionStorage>(&data) {
        Ok(session) if session.version == STORAGE_VERSION => Some(session),
        Ok(session) => {
            tracing::warn!("unsupported session storage version: {}", session.version);
            None
        }
        Err(e) => {
            tracing::warn!("failed to parse session file: {e}");
            None
        }
    }
}

/// Save the session to file (sync).
///
/// Creates parent directories if needed. Sets file permissions to 0o600.
pub fn save_session(path: &Path, session: &mut SessionStorage) -> Result<(), AuthError> {
    session.last_updated = chrono::Utc::now().to_rfc3339();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, &json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        let _ = std::fs::set_permissions(path, perms);
    }

    Ok(())
}

/// Delete the session file (sign-out).
pub fn clear_session(path: &Path) -> Result<(), AuthError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AuthError::Io(e)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserProfile;
    use tempfile::TempDir;

    fn test_path(dir: &TempDir) -> PathBuf {
        dir.path().join("session.json")
    }

    #[test]
    fn session_file_path_construction() {
        let p = session_file_path(Path::new("/home/user/.traq"));
        assert_eq!(p, PathBuf::from("/home/user/.traq/session.json"));
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_session(&test_path(&dir)).is_none());
    }

    #[test]
    fn load_invalid_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = test_path(&dir);
        std::fs::write(&path, "not json").unwrap();
        assert!(load_session(&path).is_none());
    }

    #[test]
    fn load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = test_path(&dir);
        std::fs::write(
            &path,
            r#"{"version":2,"accessToken":"tok","lastUpdated":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(load_session(&path).is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = test_path(&dir);

        let mut session = SessionStorage::new("tok-123".to_string()).with_user(UserProfile {
            name: Some("Ada".to_string()),
            email: None,
        });
        save_session(&path, &mut session).unwrap();

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.version, STORAGE_VERSION);
        assert_eq!(loaded.access_token, "tok-123");
        assert_eq!(loaded.user.unwrap().name.as_deref(), Some("Ada"));
    }

    #[test]
    fn save_stamps_last_updated() {
        let dir = TempDir::new().unwrap();
        let path = test_path(&dir);

        let mut session = SessionStorage::new("tok".to_string());
        assert!(session.last_updated.is_empty());
        save_session(&path, &mut session).unwrap();
        assert!(!session.last_updated.is_empty());
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dir").join("session.json");
        let mut session = SessionStorage::new("tok".to_string());
        save_session(&path, &mut session).unwrap();
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn save_sets_permissions_0600() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = test_path(&dir);
        let mut session = SessionStorage::new("tok".to_string());
        save_session(&path, &mut session).unwrap();
        let perms = std::fs::metadata(&path).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }

    #[test]
    fn clear_session_deletes_file() {
        let dir = TempDir::new().unwrap();
        let path = test_path(&dir);

        let mut session = SessionStorage::new("tok".to_string());
        save_session(&path, &mut session).unwrap();
        assert!(path.exists());

        clear_session(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn clear_session_noop_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(clear_session(&test_path(&dir)).is_ok());
    }
}
