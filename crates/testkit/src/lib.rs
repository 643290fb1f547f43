//! # kvlog-testkit
//!
//! Test helpers and in-memory collaborators.
//! This crate depends on `adapters`, `ports`, and `shared`.

pub mod errors;
pub mod in_memory;

pub use in_memory::{MemoryLogSink, MemoryLogger, RecordingExit, memory_logger};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
