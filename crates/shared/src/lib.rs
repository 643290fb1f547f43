//! # kvlog-shared
//!
//! Shared error and record types for the kvlog workspace.
//!
//! This crate provides the foundational types used across all other crates:
//!
//! - [`AppError`], the structured application error consumed by loggers
//! - [`Flatten`] and [`FieldValue`], the record flattening contracts
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Compile-time shape** - Record flattening is resolved statically per type
//! 3. **Serde-compatible** - Record values are plain `serde_json::Value`s

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod flatten;
pub mod result;

pub use errors::{AppError, ErrorCode, ErrorMetadata};
pub use flatten::{FieldValue, Flatten, FlattenedRecord, flatten_optional};
pub use result::Result;

/// Re-exported so derived `Flatten` impls can name JSON values without a
/// direct `serde_json` dependency in the deriving crate.
pub use serde_json;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
