//! CLI bootstrap - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together: state
//! paths are resolved and created, the configuration invariants checked,
//! the platform precondition probed, and the concrete store, probe, power
//! and lock implementations composed into a `SessionController`.

use std::sync::Arc;

use tracing::debug;

use wakelock_core::{WakelockConfig, ensure_directory};
use wakelock_runtime::{
    DirSessionStore, LockFile, PmsetController, SessionController, SignalProbe,
};

use crate::error::CliError;

/// Compose the session controller for one invocation.
pub fn bootstrap(config: &WakelockConfig) -> Result<SessionController, CliError> {
    config.validate()?;

    if let Some(parent) = config.lock_path.parent() {
        ensure_directory(parent)?;
    }
    ensure_directory(&config.registry_dir)?;
    debug!(
        "state paths: lock={} registry={}",
        config.lock_path.display(),
        config.registry_dir.display()
    );

    let power = PmsetController::detect()?;
    let store = Arc::new(DirSessionStore::new(config.registry_dir.clone()));
    let probe = Arc::new(SignalProbe::new());
    let lock = LockFile::from_config(config);

    Ok(SessionController::new(lock, store, probe, Arc::new(power)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::time::Duration;

    use wakelock_core::DEFAULT_INITIAL_WAIT;

    #[test]
    fn invalid_config_is_rejected_before_any_setup() {
        let config = WakelockConfig {
            lock_path: PathBuf::from("/nonexistent/wakelock.lock"),
            registry_dir: PathBuf::from("/nonexistent/sessions"),
            initial_wait: DEFAULT_INITIAL_WAIT,
            max_wait: Duration::from_secs(1),
        };

        // Validation runs first, so the bogus paths are never touched
        assert!(matches!(
            bootstrap(&config),
            Err(CliError::Config(_))
        ));
    }
}
