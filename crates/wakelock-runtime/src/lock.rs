//! Process-external mutual exclusion via an advisory file lock.
//!
//! Every invocation serializes its registry transaction behind one
//! exclusive lock on a well-known file. Acquisition is a non-blocking
//! `flock` attempt retried with exponential backoff against a wall-clock
//! deadline, in two phases: a quiet initial phase, then a noisy remainder
//! up to the total budget. A timed-out attempt leaves no partial lock
//! state; registry mutation only ever starts after acquisition succeeds.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(unix)]
use std::fs::{self, File, OpenOptions};
#[cfg(unix)]
use std::time::Instant;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::fcntl::{Flock, FlockArg};
use thiserror::Error;
#[cfg(unix)]
use tracing::{debug, warn};

use wakelock_core::WakelockConfig;

/// First retry delay after a contended attempt.
#[cfg(unix)]
const INITIAL_BACKOFF: Duration = Duration::from_millis(10);

/// Retry delay ceiling.
#[cfg(unix)]
const MAX_BACKOFF: Duration = Duration::from_millis(100);

/// Errors produced while acquiring or releasing the lock.
#[derive(Debug, Error)]
pub enum LockError {
    /// The lock file could not be opened or created.
    #[error("failed to open lock file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The lock syscall failed for a reason other than contention.
    #[error("failed to lock {path}: {source}")]
    Acquire {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The total wait budget elapsed without obtaining the lock.
    #[error("timed out after {waited:?} waiting for lock {path}")]
    Timeout { path: PathBuf, waited: Duration },

    /// The lock could not be released cleanly.
    #[error("failed to release lock {path}: {source}")]
    Release {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File locking is not available on this platform.
    #[cfg(not(unix))]
    #[error("file locking is not supported on this platform")]
    Unsupported,
}

/// Handle to the well-known lock file plus the wait budgets.
#[derive(Debug, Clone)]
pub struct LockFile {
    path: PathBuf,
    initial_wait: Duration,
    max_wait: Duration,
}

impl LockFile {
    /// Create a handle for the given path and wait budgets.
    pub fn new(path: impl Into<PathBuf>, initial_wait: Duration, max_wait: Duration) -> Self {
        Self {
            path: path.into(),
            initial_wait,
            max_wait,
        }
    }

    /// Create a handle from a validated configuration.
    #[must_use]
    pub fn from_config(config: &WakelockConfig) -> Self {
        Self::new(
            config.lock_path.clone(),
            config.initial_wait,
            config.max_wait,
        )
    }

    /// Acquire the exclusive lock, waiting up to the total budget.
    ///
    /// After `initial_wait` without success a notice is emitted so the
    /// user knows another invocation holds the lock; polling then
    /// continues with the remaining budget. Exceeding `max_wait` returns
    /// [`LockError::Timeout`] and is fatal for the invocation.
    pub async fn acquire(&self) -> Result<LockGuard, LockError> {
        #[cfg(unix)]
        {
            self.acquire_flock().await
        }

        #[cfg(not(unix))]
        {
            Err(LockError::Unsupported)
        }
    }

    #[cfg(unix)]
    async fn acquire_flock(&self) -> Result<LockGuard, LockError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| LockError::Open {
                path: self.path.clone(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|source| LockError::Open {
                path: self.path.clone(),
                source,
            })?;

        let start = Instant::now();
        let mut backoff = INITIAL_BACKOFF;
        let mut notified = false;

        loop {
            match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
                Ok(flock) => {
                    debug!("acquired lock {}", self.path.display());
                    return Ok(LockGuard {
                        flock: Some(flock),
                        path: self.path.clone(),
                    });
                }
                Err((returned, errno)) if errno == Errno::EWOULDBLOCK => file = returned,
                Err((_, errno)) => {
                    return Err(LockError::Acquire {
                        path: self.path.clone(),
                        source: io::Error::from_raw_os_error(errno as i32),
                    });
                }
            }

            let elapsed = start.elapsed();
            if elapsed >= self.max_wait {
                return Err(LockError::Timeout {
                    path: self.path.clone(),
                    waited: elapsed,
                });
            }
            if !notified && elapsed >= self.initial_wait {
                warn!(
                    "lock {} is held by another invocation, waiting up to {:?} more",
                    self.path.display(),
                    self.max_wait - elapsed
                );
                notified = true;
            }

            let remaining = self.max_wait - elapsed;
            tokio::time::sleep(backoff.min(remaining)).await;
            backoff = backoff.saturating_mul(2).min(MAX_BACKOFF);
        }
    }
}

/// Held exclusive lock.
///
/// Dropping the guard releases the lock (crash safety); the orderly path
/// is [`LockGuard::release`], called by the controller strictly after the
/// registry flush so the unlock is the last effect of the invocation.
#[cfg(unix)]
#[derive(Debug)]
pub struct LockGuard {
    flock: Option<Flock<File>>,
    path: PathBuf,
}

#[cfg(unix)]
impl LockGuard {
    /// Sync the lock file and release the lock explicitly.
    pub fn release(mut self) -> Result<(), LockError> {
        let Some(flock) = self.flock.take() else {
            return Ok(());
        };

        flock.sync_all().map_err(|source| LockError::Release {
            path: self.path.clone(),
            source,
        })?;
        flock.unlock().map_err(|(_, errno)| LockError::Release {
            path: self.path.clone(),
            source: io::Error::from_raw_os_error(errno as i32),
        })?;
        debug!("released lock {}", self.path.display());
        Ok(())
    }
}

/// Fallback guard for platforms without file locking.
#[cfg(not(unix))]
pub struct LockGuard {
    _private: (),
}

#[cfg(not(unix))]
impl LockGuard {
    /// No lock is ever held on these platforms.
    pub fn release(self) -> Result<(), LockError> {
        Ok(())
    }
}
