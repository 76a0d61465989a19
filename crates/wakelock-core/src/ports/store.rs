//! Session store port and the in-memory reference implementation.
//!
//! The registry is a set of session identifiers. The production store is a
//! directory of marker files; the in-memory store here exists so the
//! cleanup engine and controller logic can be exercised without touching
//! the real filesystem.

use std::collections::BTreeSet;
use std::sync::Mutex;

use thiserror::Error;

use crate::session::SessionId;

/// Errors produced by session store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to create a session marker.
    #[error("failed to add session marker: {0}")]
    Add(String),

    /// Failed to remove a session marker.
    #[error("failed to remove session marker: {0}")]
    Remove(String),

    /// Failed to enumerate the registry.
    #[error("failed to list session registry: {0}")]
    List(String),

    /// Failed to flush pending registry writes.
    #[error("failed to flush session registry: {0}")]
    Flush(String),
}

/// Set of registered sessions.
///
/// All mutation happens under the invocation-wide lock, so implementations
/// do not need internal ordering guarantees beyond plain consistency.
pub trait SessionStore: Send + Sync {
    /// Register a session. Re-adding an existing identifier is not an
    /// error; the registrations collapse to one entry.
    fn add(&self, id: SessionId) -> Result<(), StoreError>;

    /// Deregister a session. Returns whether an entry existed.
    fn remove(&self, id: SessionId) -> Result<bool, StoreError>;

    /// Snapshot of the currently registered identifiers, ascending.
    fn list(&self) -> Result<Vec<SessionId>, StoreError>;

    /// Durably persist any pending writes. Called before the lock is
    /// released so another invocation can never observe in-flight state.
    fn flush(&self) -> Result<(), StoreError>;
}

/// In-memory session store for tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<BTreeSet<SessionId>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn add(&self, id: SessionId) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .map_err(|e| StoreError::Add(e.to_string()))?
            .insert(id);
        Ok(())
    }

    fn remove(&self, id: SessionId) -> Result<bool, StoreError> {
        Ok(self
            .sessions
            .lock()
            .map_err(|e| StoreError::Remove(e.to_string()))?
            .remove(&id))
    }

    fn list(&self) -> Result<Vec<SessionId>, StoreError> {
        Ok(self
            .sessions
            .lock()
            .map_err(|e| StoreError::List(e.to_string()))?
            .iter()
            .copied()
            .collect())
    }

    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
