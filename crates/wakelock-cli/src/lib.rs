//! CLI adapter for wakelock.
//!
//! Parsing, error-to-exit-code mapping and the composition root live
//! here; `main.rs` only wires them together.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod error;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::bootstrap;
pub use error::CliError;
pub use parser::Cli;
