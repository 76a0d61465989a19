//! External power command invocation.
//!
//! The machine-level sleep override is toggled through `pmset`, invoked
//! as a privileged operation via `sudo`. The command's exit status is
//! surfaced to the caller, which treats a failure as a warning rather
//! than aborting the registry transaction.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use wakelock_core::{PowerController, PowerError};

/// Program probed on `PATH` at startup.
const PMSET_PROGRAM: &str = "pmset";

/// `PowerController` backed by `sudo pmset -a disablesleep {1,0}`.
pub struct PmsetController {
    pmset: PathBuf,
}

impl PmsetController {
    /// Locate `pmset` on `PATH`.
    ///
    /// A missing command is a platform precondition failure; callers
    /// treat it as fatal at startup.
    pub fn detect() -> Result<Self, PowerError> {
        let pmset = which::which(PMSET_PROGRAM)
            .map_err(|e| PowerError::Unavailable(format!("{PMSET_PROGRAM}: {e}")))?;
        Ok(Self::new(pmset))
    }

    /// Create a controller for an already-resolved `pmset` path.
    pub fn new(pmset: impl Into<PathBuf>) -> Self {
        Self {
            pmset: pmset.into(),
        }
    }

    async fn run(&self, setting: &str, value: &str) -> Result<(), PowerError> {
        let status = Command::new("sudo")
            .arg(&self.pmset)
            .args(["-a", setting, value])
            .status()
            .await
            .map_err(|e| {
                PowerError::Spawn(format!(
                    "sudo {} -a {setting} {value}: {e}",
                    self.pmset.display()
                ))
            })?;

        if !status.success() {
            return Err(PowerError::Failed {
                status: status.code().unwrap_or(-1),
            });
        }

        debug!("pmset -a {setting} {value} succeeded");
        Ok(())
    }
}

#[async_trait]
impl PowerController for PmsetController {
    async fn disable_sleep(&self) -> Result<(), PowerError> {
        self.run("disablesleep", "1").await
    }

    async fn restore_defaults(&self) -> Result<(), PowerError> {
        self.run("disablesleep", "0").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_answers_for_the_current_system() {
        // pmset only exists on macOS hosts; on other systems detect must
        // report Unavailable rather than panic.
        match PmsetController::detect() {
            Ok(controller) => assert!(controller.pmset.ends_with(PMSET_PROGRAM)),
            Err(PowerError::Unavailable(message)) => assert!(message.contains(PMSET_PROGRAM)),
            Err(other) => panic!("unexpected detect error: {other}"),
        }
    }

    #[test]
    fn new_keeps_the_resolved_path() {
        let controller = PmsetController::new("/usr/bin/pmset");
        assert_eq!(controller.pmset, PathBuf::from("/usr/bin/pmset"));
    }
}
