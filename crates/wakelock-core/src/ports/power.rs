//! Power control port.
//!
//! The machine-level power setting is mutated through an external,
//! privileged command. The controller only decides *when* the two effects
//! happen; this port hides *how*, so tests can assert the invocations
//! without privileged OS access.

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced when invoking the external power command.
#[derive(Debug, Error)]
pub enum PowerError {
    /// The required command is not available on this system.
    #[error("power command unavailable: {0}")]
    Unavailable(String),

    /// The command could not be spawned.
    #[error("failed to run power command: {0}")]
    Spawn(String),

    /// The command ran but reported failure.
    #[error("power command exited with status {status}")]
    Failed { status: i32 },
}

/// Capability to change the machine's sleep behavior.
///
/// Both effects are best-effort from the caller's point of view: a failure
/// is surfaced so it can be logged, but it never aborts the registry
/// transaction that triggered it.
#[async_trait]
pub trait PowerController: Send + Sync {
    /// Disable machine sleep indefinitely.
    async fn disable_sleep(&self) -> Result<(), PowerError>;

    /// Restore the default sleep settings.
    async fn restore_defaults(&self) -> Result<(), PowerError>;
}
