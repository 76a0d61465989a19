//! Session controller: one registry transaction per invocation.
//!
//! The controller composes the lock, the registry, the sweep and the
//! power capability. `run` is a complete transaction: acquire the lock,
//! apply the selected operation, flush the registry, release the lock as
//! the final effect. Registry-level failures inside an operation are
//! warnings; only lock and enumeration failures propagate.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use wakelock_core::{LivenessProbe, PowerController, SessionId, SessionStore, StoreError};

use crate::lock::{LockError, LockFile};
use crate::sweep::CleanupEngine;

/// Operation selected for this invocation. Exactly one per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Register the session and disable sleep.
    Start,
    /// Deregister the session; restore defaults when no live session remains.
    End,
    /// Prune dead sessions; no registration, no power change.
    Cleanup,
    /// Wipe the registry unconditionally, then start the session.
    /// Manual recovery after a crash leaves stale markers behind.
    OnlyThisSession,
}

/// Errors that abort an invocation.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Top-level orchestrator for a single invocation.
pub struct SessionController {
    lock: LockFile,
    store: Arc<dyn SessionStore>,
    engine: CleanupEngine,
    power: Arc<dyn PowerController>,
}

impl SessionController {
    /// Compose a controller from its collaborators.
    pub fn new(
        lock: LockFile,
        store: Arc<dyn SessionStore>,
        probe: Arc<dyn LivenessProbe>,
        power: Arc<dyn PowerController>,
    ) -> Self {
        let engine = CleanupEngine::new(Arc::clone(&store), probe);
        Self {
            lock,
            store,
            engine,
            power,
        }
    }

    /// Run one operation as a complete transaction.
    ///
    /// The registry is flushed and the lock released only after the
    /// operation finishes, so a concurrent invocation can never observe
    /// the registry mid-transaction.
    pub async fn run(
        &self,
        operation: Operation,
        session: SessionId,
    ) -> Result<(), ControllerError> {
        let guard = self.lock.acquire().await?;
        let outcome = self.dispatch(operation, session).await;
        let flushed = self.store.flush().map_err(ControllerError::from);
        // Unlock strictly after the flush; this is the last effect of the run.
        let released = guard.release().map_err(ControllerError::from);
        outcome.and(flushed).and(released)
    }

    async fn dispatch(
        &self,
        operation: Operation,
        session: SessionId,
    ) -> Result<(), ControllerError> {
        match operation {
            Operation::Start => self.start(session).await,
            Operation::End => self.end(session).await,
            Operation::Cleanup => {
                self.engine.sweep(false)?;
                Ok(())
            }
            Operation::OnlyThisSession => {
                info!("wiping session registry before restart");
                self.engine.sweep(true)?;
                self.start(session).await
            }
        }
    }

    async fn start(&self, session: SessionId) -> Result<(), ControllerError> {
        self.store.add(session)?;
        debug!("session {session} registered");

        if let Err(e) = self.power.disable_sleep().await {
            warn!("could not disable sleep: {e}");
        }

        // Opportunistic garbage collection; the liveness verdict is not
        // needed here.
        if let Err(e) = self.engine.sweep(false) {
            warn!("post-start sweep failed: {e}");
        }
        Ok(())
    }

    async fn end(&self, session: SessionId) -> Result<(), ControllerError> {
        match self.store.remove(session) {
            Ok(true) => debug!("session {session} deregistered"),
            Ok(false) => warn!("no session marker for {session}"),
            Err(e) => warn!("could not remove session marker {session}: {e}"),
        }

        let live = self.engine.sweep(false)?;
        if live {
            debug!("live sessions remain, leaving sleep disabled");
        } else {
            info!("no live sessions remain, restoring sleep defaults");
            if let Err(e) = self.power.restore_defaults().await {
                warn!("could not restore sleep defaults: {e}");
            }
        }
        Ok(())
    }
}
