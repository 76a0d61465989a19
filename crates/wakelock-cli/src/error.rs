//! CLI-specific error type and exit-code mapping.
//!
//! Usage errors are handled by clap itself (exit status 2); everything
//! that reaches this type happened after a well-formed invocation.

use thiserror::Error;

use wakelock_core::{ConfigError, PathError, PowerError};
use wakelock_runtime::{ControllerError, LockError};

/// Fatal errors of one invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration invariant violated.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// State paths could not be resolved or created.
    #[error(transparent)]
    Paths(#[from] PathError),

    /// Platform precondition failed (power command missing).
    #[error(transparent)]
    Power(#[from] PowerError),

    /// The registry transaction failed.
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

impl CliError {
    /// Map the error to an exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: success
    /// - 2: usage error (clap exits with this on its own)
    /// - 64-78: sysexits.h categories for specific failures
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78, // EX_CONFIG
            Self::Paths(_) => 73,  // EX_CANTCREAT
            Self::Power(_) => 69,  // EX_UNAVAILABLE
            Self::Controller(ControllerError::Lock(LockError::Timeout { .. })) => 75, // EX_TEMPFAIL
            Self::Controller(_) => 74, // EX_IOERR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::time::Duration;

    use wakelock_core::MIN_MAX_WAIT;

    #[test]
    fn lock_timeout_maps_to_tempfail() {
        let err = CliError::from(ControllerError::Lock(LockError::Timeout {
            path: PathBuf::from("/tmp/wakelock.lock"),
            waited: Duration::from_secs(5),
        }));
        assert_eq!(err.exit_code(), 75);
    }

    #[test]
    fn config_errors_map_to_ex_config() {
        let err = CliError::from(ConfigError::MaxWaitTooShort {
            actual: Duration::from_secs(1),
            min: MIN_MAX_WAIT,
        });
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn missing_power_command_maps_to_ex_unavailable() {
        let err = CliError::from(PowerError::Unavailable("pmset: not found".into()));
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn path_errors_map_to_ex_cantcreat() {
        let err = CliError::from(PathError::NotADirectory(PathBuf::from("/tmp/x")));
        assert_eq!(err.exit_code(), 73);
    }
}
