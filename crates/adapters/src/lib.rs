//! # kvlog-adapters
//!
//! Logger implementations: the JSON logger, the no-op logger, line sinks,
//! and error decomposition.
//! This crate depends on `ports`, `shared`, and `config`.

/// Error value decomposition.
pub mod error_adapter;
pub mod log_sink;
pub mod logger;
pub mod noop;
pub mod process_exit;
/// Record encoding.
pub mod record;

pub use error_adapter::{AdaptedError, adapt_app_error, adapt_error};
pub use log_sink::{LogSink, StderrLogSink, WriterLogSink};
pub use logger::JsonLogger;
pub use noop::NoopLogger;
pub use process_exit::{FATAL_EXIT_CODE, ProcessExit, StdProcessExit};
pub use record::{collapse_pairs, encode_line};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
