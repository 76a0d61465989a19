//! Registry sweep: prune markers whose sessions are gone.
//!
//! The sweep is the reference-counting half of the design. It never
//! aborts on a single bad marker; deletion failures are logged and the
//! enumeration keeps going so one wedged entry cannot block the rest.

use std::sync::Arc;

use tracing::{debug, info, warn};

use wakelock_core::{LivenessProbe, SessionStore, StoreError};

/// Sweeps the session registry against a liveness probe.
pub struct CleanupEngine {
    store: Arc<dyn SessionStore>,
    probe: Arc<dyn LivenessProbe>,
}

impl CleanupEngine {
    /// Create an engine over the given store and probe.
    pub fn new(store: Arc<dyn SessionStore>, probe: Arc<dyn LivenessProbe>) -> Self {
        Self { store, probe }
    }

    /// Sweep the registry and report whether a live session remains.
    ///
    /// With `delete_all` every marker is removed regardless of liveness
    /// (crash-recovery wipe) and no live session is ever reported.
    /// Otherwise only markers whose process is gone are removed. The
    /// return value of `false` is what triggers restoring the machine's
    /// default power state downstream.
    pub fn sweep(&self, delete_all: bool) -> Result<bool, StoreError> {
        let sessions = self.store.list()?;
        if sessions.is_empty() {
            debug!("session registry is empty");
            return Ok(false);
        }

        let mut live = false;
        let mut removed = 0_usize;
        for id in sessions {
            if !delete_all && self.probe.is_alive(id) {
                debug!("session {id} is alive");
                live = true;
                continue;
            }

            match self.store.remove(id) {
                Ok(true) => removed += 1,
                Ok(false) => debug!("session marker {id} was already gone"),
                Err(e) => warn!("could not remove session marker {id}: {e}"),
            }
        }

        if removed > 0 {
            info!("removed {removed} session marker(s)");
        }
        Ok(live)
    }
}
