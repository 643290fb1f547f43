//! Structured JSON logger adapter.

use crate::error_adapter::adapt_error;
use crate::log_sink::{LogSink, StderrLogSink};
use crate::process_exit::{FATAL_EXIT_CODE, ProcessExit, StdProcessExit};
use crate::record::encode_line;
use kvlog_config::LogSinkConfig;
use kvlog_ports::{
    EventLevel, KeyValues, LEVEL_KEY, LogEvent, LogLevel, LogResult, Logger, MESSAGE_KEY,
};
use serde_json::Value;
use std::error::Error;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// JSON logger emitting one line per event.
///
/// The context is immutable: [`JsonLogger::child`] and [`Logger::with`]
/// return a new logger sharing the same sink.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    exit: Arc<dyn ProcessExit>,
    context: KeyValues,
    timestamp_key: Option<Arc<str>>,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            exit: Arc::new(StdProcessExit),
            context: KeyValues::new(),
            timestamp_key: None,
        }
    }

    /// Create a JSON logger writing to stderr with the options in `config`.
    #[must_use]
    pub fn from_config(config: &LogSinkConfig) -> Self {
        let logger = Self::new(Arc::new(StderrLogSink));
        match config.timestamp_key.as_deref() {
            Some(key) => logger.with_timestamp_key(key),
            None => logger,
        }
    }

    /// Set the context pairs attached to every record.
    #[must_use]
    pub fn with_context(mut self, context: KeyValues) -> Self {
        self.context = context;
        self
    }

    /// Replace the process-exit hook used by `fatal`.
    #[must_use]
    pub fn with_exit(mut self, exit: Arc<dyn ProcessExit>) -> Self {
        self.exit = exit;
        self
    }

    /// Stamp every record with the emission time under `key`.
    #[must_use]
    pub fn with_timestamp_key(mut self, key: impl Into<Arc<str>>) -> Self {
        self.timestamp_key = Some(key.into());
        self
    }

    /// Context pairs attached to every record.
    #[must_use]
    pub const fn context(&self) -> &KeyValues {
        &self.context
    }

    /// Derive a logger whose context is this one's followed by `fields`.
    #[must_use]
    pub fn child(&self, fields: KeyValues) -> Self {
        let mut context = self.context.clone();
        context.extend(fields);
        Self {
            sink: Arc::clone(&self.sink),
            exit: Arc::clone(&self.exit),
            context,
            timestamp_key: self.timestamp_key.clone(),
        }
    }

    fn base_pairs(&self, extra: usize) -> KeyValues {
        let mut pairs = KeyValues::with_capacity(self.context.len() + extra + 1);
        if let Some(key) = self.timestamp_key.as_deref() {
            pairs.push(key, Value::from(now_epoch_ms()));
        }
        pairs.extend_from(&self.context);
        pairs
    }

    fn write_leveled(&self, level: Option<LogLevel>, fields: KeyValues) -> LogResult {
        let mut pairs = self.base_pairs(fields.len() + 1);
        if let Some(level) = level {
            pairs.push(LEVEL_KEY, level.as_str());
        }
        pairs.extend(fields);
        self.write(&pairs)
    }

    fn write(&self, pairs: &KeyValues) -> LogResult {
        let line = encode_line(pairs)?;
        self.sink.write_line(&line);
        Ok(())
    }
}

impl Logger for JsonLogger {
    fn emit(&self, event: LogEvent) -> LogResult {
        self.write_leveled(event.level.map(EventLevel::level), event.fields)
    }

    fn error(&self, error: Option<&(dyn Error + 'static)>, fields: KeyValues) -> LogResult {
        let Some(adapted) = adapt_error(error) else {
            return Ok(());
        };

        let mut pairs = self.base_pairs(fields.len() + adapted.fields.len() + 2);
        pairs.push(LEVEL_KEY, LogLevel::Error.as_str());
        if let Some(message) = adapted.message {
            pairs.push(MESSAGE_KEY, message);
        }
        pairs.extend(fields);
        pairs.extend(adapted.fields);
        self.write(&pairs)
    }

    fn fatal(&self, fields: KeyValues) -> LogResult {
        let result = self.write_leveled(Some(LogLevel::Fatal), fields);
        tracing::debug!(code = FATAL_EXIT_CODE, "fatal record written, exiting");
        self.exit.exit(FATAL_EXIT_CODE);
        result
    }

    fn with(&self, fields: KeyValues) -> Box<dyn Logger> {
        Box::new(self.child(fields))
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}
