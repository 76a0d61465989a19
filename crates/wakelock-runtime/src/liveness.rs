//! Null-signal liveness checks.
//!
//! A session identifier names a PID; the registry only cares whether that
//! process still exists. The check sends no actual signal.

#[cfg(unix)]
use nix::sys::signal;
#[cfg(unix)]
use nix::unistd::Pid;

use wakelock_core::{LivenessProbe, SessionId};

/// Liveness probe backed by `kill(pid, 0)`.
///
/// # Platform behavior
/// - **Unix**: the null signal checks existence without delivering
///   anything to the target.
/// - **Other**: always reports not alive.
///
/// # Limitations
/// A process owned by another user answers `EPERM` and is reported as not
/// alive, indistinguishable from a missing process. PIDs are also reused
/// by the OS over time, so a stale marker can name an unrelated process.
/// Both are accepted inaccuracies of the design, not errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProbe;

impl SignalProbe {
    /// Create the probe.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LivenessProbe for SignalProbe {
    fn is_alive(&self, id: SessionId) -> bool {
        pid_alive(id)
    }
}

#[cfg(unix)]
fn pid_alive(id: SessionId) -> bool {
    i32::try_from(id.get())
        .is_ok_and(|pid| signal::kill(Pid::from_raw(pid), None).is_ok())
}

#[cfg(not(unix))]
fn pid_alive(_id: SessionId) -> bool {
    false
}
