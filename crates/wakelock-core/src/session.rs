//! Session identifier type.
//!
//! A session is identified by the PID of the process that registered it.
//! The identifier doubles as the marker file name in the registry, so the
//! parsing rules here (decimal digits, nonzero) are also the filtering
//! rules for registry entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when parsing a session identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSessionIdError {
    /// The input contained something other than decimal digits.
    #[error("session id must be a positive decimal number")]
    NotNumeric,

    /// The input was numeric but does not fit a PID.
    #[error("session id is out of range")]
    OutOfRange,

    /// Zero is never a valid PID.
    #[error("session id must be nonzero")]
    Zero,
}

/// Identifier of one registered session: the PID of the owning process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(u32);

impl SessionId {
    /// Create an identifier from a raw PID. Returns `None` for zero.
    #[must_use]
    pub const fn new(pid: u32) -> Option<Self> {
        if pid == 0 { None } else { Some(Self(pid)) }
    }

    /// The identifier of the current process.
    #[must_use]
    pub fn current() -> Self {
        Self(std::process::id())
    }

    /// The raw PID value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ParseSessionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseSessionIdError::NotNumeric);
        }
        let pid: u32 = s.parse().map_err(|_| ParseSessionIdError::OutOfRange)?;
        Self::new(pid).ok_or(ParseSessionIdError::Zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_pid() {
        let id: SessionId = "4242".parse().expect("parse failed");
        assert_eq!(id.get(), 4242);
        assert_eq!(id.to_string(), "4242");
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(
            "12a".parse::<SessionId>(),
            Err(ParseSessionIdError::NotNumeric)
        );
        assert_eq!(
            "-5".parse::<SessionId>(),
            Err(ParseSessionIdError::NotNumeric)
        );
        assert_eq!("".parse::<SessionId>(), Err(ParseSessionIdError::NotNumeric));
        assert_eq!(
            " 7".parse::<SessionId>(),
            Err(ParseSessionIdError::NotNumeric)
        );
    }

    #[test]
    fn rejects_zero() {
        assert_eq!("0".parse::<SessionId>(), Err(ParseSessionIdError::Zero));
        assert!(SessionId::new(0).is_none());
    }

    #[test]
    fn rejects_overflowing_pid() {
        assert_eq!(
            "99999999999999999999".parse::<SessionId>(),
            Err(ParseSessionIdError::OutOfRange)
        );
    }

    #[test]
    fn current_matches_process_id() {
        assert_eq!(SessionId::current().get(), std::process::id());
    }
}
