//! Well-known state paths and directory utilities.
//!
//! The lock file and the session registry live under a single scratch root
//! shared by every invocation on the host. The root is the system temp
//! directory by default and can be overridden with `WAKELOCK_STATE_DIR`
//! (useful for hermetic tests and non-default deployments).

use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Lock file name under the state root.
const LOCK_FILE_NAME: &str = "wakelock.lock";

/// Registry directory name under the state root.
const SESSIONS_DIR_NAME: &str = "sessions";

/// Environment variable overriding the state root.
const STATE_DIR_ENV: &str = "WAKELOCK_STATE_DIR";

/// Errors that can occur during path resolution and directory operations.
#[derive(Debug, Error)]
pub enum PathError {
    /// The state directory override was set but empty.
    #[error("WAKELOCK_STATE_DIR is set but empty")]
    EmptyOverride,

    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to create a directory.
    #[error("failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// A directory is not writable.
    #[error("directory {path} is not writable: {reason}")]
    NotWritable { path: PathBuf, reason: String },
}

fn resolve_state_root(override_value: Option<&str>) -> Result<PathBuf, PathError> {
    match override_value {
        Some("") => Err(PathError::EmptyOverride),
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(env::temp_dir().join("wakelock")),
    }
}

/// Root directory for all shared wakelock state.
///
/// Resolution order:
/// 1. `WAKELOCK_STATE_DIR` environment variable
/// 2. `<system temp dir>/wakelock`
pub fn state_root() -> Result<PathBuf, PathError> {
    let override_value = env::var(STATE_DIR_ENV).ok();
    resolve_state_root(override_value.as_deref())
}

/// Path of the mutual-exclusion lock file.
pub fn lock_file_path() -> Result<PathBuf, PathError> {
    Ok(state_root()?.join(LOCK_FILE_NAME))
}

/// Directory holding one marker file per registered session.
pub fn sessions_dir() -> Result<PathBuf, PathError> {
    Ok(state_root()?.join(SESSIONS_DIR_NAME))
}

/// Ensure the directory exists (creating parents as needed) and is writable.
///
/// Safe to call on every startup; creation is idempotent.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    verify_writable(path)
}

/// Verify a directory is writable by creating and removing a probe file.
fn verify_writable(path: &Path) -> Result<(), PathError> {
    let probe = path.join(".wakelock_write_test");
    let result = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe);

    match result {
        Ok(mut file) => {
            file.write_all(b"test").map_err(|e| PathError::NotWritable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            drop(file);
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(err) => Err(PathError::NotWritable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_root_is_under_temp_dir() {
        let root = resolve_state_root(None).expect("resolve failed");
        assert!(root.starts_with(env::temp_dir()));
        assert!(root.ends_with("wakelock"));
    }

    #[test]
    fn override_wins_and_empty_override_is_rejected() {
        let root = resolve_state_root(Some("/var/run/wakelock")).expect("resolve failed");
        assert_eq!(root, PathBuf::from("/var/run/wakelock"));

        assert!(matches!(
            resolve_state_root(Some("")),
            Err(PathError::EmptyOverride)
        ));
    }

    #[test]
    fn well_known_paths_share_the_root() {
        let root = state_root().expect("state_root failed");
        assert_eq!(lock_file_path().expect("lock path"), root.join("wakelock.lock"));
        assert_eq!(sessions_dir().expect("sessions dir"), root.join("sessions"));
    }

    #[test]
    fn ensure_directory_creates_nested_paths_idempotently() {
        let temp = TempDir::new().expect("tempdir failed");
        let target = temp.path().join("a/b/sessions");

        ensure_directory(&target).expect("first ensure failed");
        assert!(target.is_dir());

        // Second call is a no-op
        ensure_directory(&target).expect("second ensure failed");
    }

    #[test]
    fn ensure_directory_rejects_plain_file() {
        let temp = TempDir::new().expect("tempdir failed");
        let target = temp.path().join("occupied");
        fs::write(&target, b"not a directory").expect("write failed");

        assert!(matches!(
            ensure_directory(&target),
            Err(PathError::NotADirectory(_))
        ));
    }
}
