//! OS-level runtime for wakelock.
//!
//! Implements the ports defined in `wakelock-core` against the real
//! system: an advisory file lock with a bounded two-phase wait, a
//! directory-backed session registry, null-signal liveness checks, the
//! registry sweep, and the external power command. The session
//! controller at the top ties one invocation together as a single
//! lock-guarded transaction.

#![deny(unsafe_code)]

pub mod controller;
pub mod liveness;
pub mod lock;
pub mod power;
pub mod registry;
pub mod sweep;

// Re-export the invocation-facing types
pub use controller::{ControllerError, Operation, SessionController};
pub use liveness::SignalProbe;
pub use lock::{LockError, LockFile, LockGuard};
pub use power::PmsetController;
pub use registry::DirSessionStore;
pub use sweep::CleanupEngine;
