//! Liveness probe port.
//!
//! The cleanup engine asks this port whether the process behind a session
//! identifier still exists. Core owns the trait; the runtime implements it
//! with a null signal, and tests script the answers.

use crate::session::SessionId;

/// Answers "does the process for this session still exist?".
///
/// Implementations are expected to be non-destructive: probing must never
/// affect the target process.
pub trait LivenessProbe: Send + Sync {
    /// True iff the OS confirms the process exists and is signalable by
    /// the current user.
    fn is_alive(&self, id: SessionId) -> bool;
}
