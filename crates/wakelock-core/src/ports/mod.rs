//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the controller expects from infrastructure.
//! The runtime crate provides the real implementations (directory-backed
//! registry, null-signal probe, `pmset` invocation); tests substitute
//! in-memory or scripted ones.
//!
//! # Design Rules
//!
//! - No filesystem or process implementation details in signatures
//! - Intent-based methods, minimal surface
//! - Every port is `Send + Sync` so adapters can share them

pub mod power;
pub mod probe;
pub mod store;

pub use power::{PowerController, PowerError};
pub use probe::LivenessProbe;
pub use store::{MemorySessionStore, SessionStore, StoreError};
