//! Directory-backed session registry.
//!
//! One zero-byte marker file per registered session, named by the decimal
//! PID. Listing filters to all-digit names that are plain regular files,
//! so subdirectories, symlinks and other stray entries in the shared
//! scratch directory never reach the liveness logic.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use tracing::debug;

use wakelock_core::{SessionId, SessionStore, StoreError};

/// `SessionStore` over a registry directory.
///
/// The directory itself is created once at bootstrap; the store assumes
/// it exists.
#[derive(Debug, Clone)]
pub struct DirSessionStore {
    dir: PathBuf,
}

impl DirSessionStore {
    /// Create a store over the given registry directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn marker_path(&self, id: SessionId) -> PathBuf {
        self.dir.join(id.to_string())
    }
}

impl SessionStore for DirSessionStore {
    fn add(&self, id: SessionId) -> Result<(), StoreError> {
        let path = self.marker_path(id);
        let marker = File::create(&path)
            .map_err(|e| StoreError::Add(format!("{}: {e}", path.display())))?;
        marker
            .sync_all()
            .map_err(|e| StoreError::Add(format!("{}: {e}", path.display())))?;
        debug!("registered session {id}");
        Ok(())
    }

    fn remove(&self, id: SessionId) -> Result<bool, StoreError> {
        let path = self.marker_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("removed session marker {id}");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Remove(format!("{}: {e}", path.display()))),
        }
    }

    fn list(&self) -> Result<Vec<SessionId>, StoreError> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| StoreError::List(format!("{}: {e}", self.dir.display())))?;

        let mut sessions = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StoreError::List(format!("{}: {e}", self.dir.display())))?;

            // file_type on a dirent does not follow symlinks
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Ok(id) = name.parse::<SessionId>() else {
                continue;
            };
            sessions.push(id);
        }

        sessions.sort_unstable();
        Ok(sessions)
    }

    fn flush(&self) -> Result<(), StoreError> {
        #[cfg(unix)]
        {
            let dir = File::open(&self.dir)
                .map_err(|e| StoreError::Flush(format!("{}: {e}", self.dir.display())))?;
            dir.sync_all()
                .map_err(|e| StoreError::Flush(format!("{}: {e}", self.dir.display())))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn id(pid: u32) -> SessionId {
        SessionId::new(pid).expect("nonzero pid")
    }

    fn store() -> (TempDir, DirSessionStore) {
        let temp = TempDir::new().expect("tempdir failed");
        let store = DirSessionStore::new(temp.path());
        (temp, store)
    }

    #[test]
    fn add_creates_one_zero_byte_marker() {
        let (temp, store) = store();
        store.add(id(4321)).expect("first add failed");
        store.add(id(4321)).expect("second add failed");

        let marker = temp.path().join("4321");
        assert!(marker.is_file());
        assert_eq!(marker.metadata().expect("metadata failed").len(), 0);
        assert_eq!(store.list().expect("list failed"), vec![id(4321)]);
    }

    #[test]
    fn remove_reports_whether_marker_existed() {
        let (_temp, store) = store();
        store.add(id(55)).expect("add failed");

        assert!(store.remove(id(55)).expect("remove failed"));
        assert!(!store.remove(id(55)).expect("second remove failed"));
    }

    #[test]
    fn list_skips_entries_that_are_not_session_markers() {
        let (temp, store) = store();
        store.add(id(100)).expect("add failed");
        store.add(id(200)).expect("add failed");

        fs::write(temp.path().join("notapid"), b"").expect("write failed");
        fs::write(temp.path().join("123abc"), b"").expect("write failed");
        fs::write(temp.path().join("0"), b"").expect("write failed");
        fs::create_dir(temp.path().join("999")).expect("mkdir failed");

        assert_eq!(store.list().expect("list failed"), vec![id(100), id(200)]);
    }

    #[test]
    #[cfg(unix)]
    fn list_skips_symlinked_markers() {
        let (temp, store) = store();
        store.add(id(100)).expect("add failed");
        std::os::unix::fs::symlink(temp.path().join("100"), temp.path().join("777"))
            .expect("symlink failed");

        assert_eq!(store.list().expect("list failed"), vec![id(100)]);
    }

    #[test]
    fn list_is_sorted_ascending() {
        let (_temp, store) = store();
        for pid in [500, 30, 4000] {
            store.add(id(pid)).expect("add failed");
        }

        assert_eq!(
            store.list().expect("list failed"),
            vec![id(30), id(500), id(4000)]
        );
    }

    #[test]
    fn flush_succeeds_on_existing_directory() {
        let (_temp, store) = store();
        store.add(id(77)).expect("add failed");
        store.flush().expect("flush failed");
    }
}
