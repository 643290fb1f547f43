//! # kvlog
//!
//! Structured key/value logging. Every call writes one JSON object per line
//! with keys in ascending order; error values are decomposed into flat
//! records.
//!
//! ```no_run
//! use kvlog::{Logger, kv};
//!
//! let logger = kvlog::new_request_context("req-42", kv!["service" => "billing"]);
//! logger.info(kv!["event" => "charge.started"])?;
//! # Ok::<(), kvlog::LogError>(())
//! ```
//!
//! Records derive their fields with `#[derive(Flatten)]`; outside the
//! `kvlog-shared` crate the derive needs `#[flatten(crate = "kvlog")]`.
//!
//! This crate depends on `adapters`, `config`, `ports`, and `shared`.

use std::path::Path;
use std::sync::Arc;

pub use kvlog_adapters::{
    AdaptedError, FATAL_EXIT_CODE, JsonLogger, LogSink, NoopLogger, ProcessExit, StdProcessExit,
    StderrLogSink, WriterLogSink, adapt_error,
};
pub use kvlog_config::{
    ConfigFormat, LogEnv, LogSinkConfig, load_log_config_from_path,
    load_log_config_from_sources, load_log_config_std_env,
};
/// Derive macro for [`Flatten`].
pub use kvlog_flatten_derive::Flatten;
pub use kvlog_ports::{
    ERROR_KEY, EventLevel, KeyValues, LEVEL_KEY, LogError, LogEvent, LogLevel, LogResult,
    Logger, MESSAGE_KEY, REQUEST_ID_KEY, kv,
};
pub use kvlog_shared::{
    AppError, ErrorCode, ErrorMetadata, FieldValue, Flatten, FlattenedRecord, flatten_optional,
    serde_json,
};

/// Returns the facade crate version.
#[must_use]
pub const fn kvlog_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Create a logger writing to stderr with `pairs` as its context.
#[must_use]
pub fn new_context(pairs: KeyValues) -> JsonLogger {
    new_context_with_sink(Arc::new(StderrLogSink), pairs)
}

/// Create a request-scoped logger writing to stderr.
///
/// The context is `pairs` followed by `request_id`.
#[must_use]
pub fn new_request_context(request_id: &str, pairs: KeyValues) -> JsonLogger {
    new_request_context_with_sink(Arc::new(StderrLogSink), request_id, pairs)
}

/// Create a logger that discards everything. `pairs` are ignored.
#[must_use]
pub fn new_noop_context(_pairs: KeyValues) -> NoopLogger {
    NoopLogger
}

/// Create a logger writing to `sink` with `pairs` as its context.
#[must_use]
pub fn new_context_with_sink(sink: Arc<dyn LogSink>, pairs: KeyValues) -> JsonLogger {
    JsonLogger::new(sink).with_context(pairs)
}

/// Create a request-scoped logger writing to `sink`.
#[must_use]
pub fn new_request_context_with_sink(
    sink: Arc<dyn LogSink>,
    request_id: &str,
    pairs: KeyValues,
) -> JsonLogger {
    new_context_with_sink(sink, pairs.and(REQUEST_ID_KEY, request_id))
}

/// Create a logger from an explicit sink config.
#[must_use]
pub fn new_context_with_config(config: &LogSinkConfig, pairs: KeyValues) -> JsonLogger {
    JsonLogger::from_config(config).with_context(pairs)
}

/// Create a logger from an optional config file and the `KVLOG_*` environment.
pub fn new_context_from_env(
    config_path: Option<&Path>,
    pairs: KeyValues,
) -> kvlog_shared::Result<JsonLogger> {
    let config = load_log_config_std_env(config_path)?;
    tracing::debug!(
        timestamp_key = config.timestamp_key.as_deref(),
        "log sink config resolved"
    );
    Ok(new_context_with_config(&config, pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_crate_compiles() {
        assert!(!kvlog_version().is_empty());
    }

    #[test]
    fn request_id_is_appended_last() {
        let logger = new_request_context("test-id", kv!["foo" => "bar"]);
        let keys: Vec<&str> = logger.context().iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["foo", REQUEST_ID_KEY]);
    }

    #[test]
    fn config_context_keeps_pairs() {
        let logger = new_context_with_config(&LogSinkConfig::default(), kv!["a" => 1]);
        assert_eq!(logger.context().len(), 1);
    }
}
