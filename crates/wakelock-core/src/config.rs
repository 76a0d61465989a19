//! Configuration for one wakelock invocation.
//!
//! All components receive their paths and timing budgets from this value;
//! nothing reads them from ambient global state. The CLI builds the config
//! once at startup, validates it, and threads it into the composition root.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::{self, PathError};

/// First lock-acquisition phase: poll quietly for this long before telling
/// the user another invocation holds the lock.
pub const DEFAULT_INITIAL_WAIT: Duration = Duration::from_secs(1);

/// Total lock-acquisition budget. Exceeding it is fatal.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(5);

/// Floor for the total budget. The maximum wait must leave room for the
/// second acquisition phase after the one-second initial phase.
pub const MIN_MAX_WAIT: Duration = Duration::new(1, 1_000);

/// Errors produced by configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The total lock wait budget is too small for the two-phase wait.
    #[error("maximum lock wait {actual:?} must exceed {min:?}")]
    MaxWaitTooShort { actual: Duration, min: Duration },
}

/// Paths and timing budgets for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakelockConfig {
    /// Path of the mutual-exclusion lock file.
    pub lock_path: PathBuf,

    /// Directory holding one marker file per registered session.
    pub registry_dir: PathBuf,

    /// Length of the quiet first lock-acquisition phase.
    pub initial_wait: Duration,

    /// Total lock-acquisition budget across both phases.
    pub max_wait: Duration,
}

impl WakelockConfig {
    /// Build a config with the well-known state paths and default budgets.
    pub fn with_defaults() -> Result<Self, PathError> {
        Ok(Self {
            lock_path: paths::lock_file_path()?,
            registry_dir: paths::sessions_dir()?,
            initial_wait: DEFAULT_INITIAL_WAIT,
            max_wait: DEFAULT_MAX_WAIT,
        })
    }

    /// Check the startup invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_wait <= MIN_MAX_WAIT {
            return Err(ConfigError::MaxWaitTooShort {
                actual: self.max_wait,
                min: MIN_MAX_WAIT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_max_wait(max_wait: Duration) -> WakelockConfig {
        WakelockConfig {
            lock_path: PathBuf::from("/tmp/wakelock-test/wakelock.lock"),
            registry_dir: PathBuf::from("/tmp/wakelock-test/sessions"),
            initial_wait: DEFAULT_INITIAL_WAIT,
            max_wait,
        }
    }

    #[test]
    fn defaults_are_valid() {
        let config = WakelockConfig::with_defaults().expect("defaults failed");
        config.validate().expect("default config must validate");
        assert_eq!(config.initial_wait, DEFAULT_INITIAL_WAIT);
        assert_eq!(config.max_wait, DEFAULT_MAX_WAIT);
    }

    #[test]
    fn rejects_max_wait_at_or_below_floor() {
        let at_floor = config_with_max_wait(MIN_MAX_WAIT);
        assert_eq!(
            at_floor.validate(),
            Err(ConfigError::MaxWaitTooShort {
                actual: MIN_MAX_WAIT,
                min: MIN_MAX_WAIT,
            })
        );

        let below = config_with_max_wait(Duration::from_secs(1));
        assert!(below.validate().is_err());
    }

    #[test]
    fn accepts_max_wait_just_above_floor() {
        let config = config_with_max_wait(Duration::new(1, 2_000));
        config.validate().expect("just above the floor must pass");
    }
}
