//! Structured logging boundary contract.

use crate::error::LogError;
use crate::pairs::KeyValues;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Info.
    Info,
    /// Warning.
    Warning,
    /// Error.
    Error,
    /// Fatal; the process terminates after the record is written.
    Fatal,
}

impl LogLevel {
    /// Wire value of the `level` key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Level of a record sent through [`Logger::emit`].
///
/// Only the non-terminal levels exist here: `error` records come from
/// [`Logger::error`] and `fatal` records from [`Logger::fatal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventLevel {
    /// Info.
    Info,
    /// Warning.
    Warning,
}

impl EventLevel {
    /// Every event level.
    pub const ALL: [Self; 2] = [Self::Info, Self::Warning];

    /// The record level written for this event level.
    #[must_use]
    pub const fn level(self) -> LogLevel {
        match self {
            Self::Info => LogLevel::Info,
            Self::Warning => LogLevel::Warning,
        }
    }
}

impl From<EventLevel> for LogLevel {
    fn from(level: EventLevel) -> Self {
        level.level()
    }
}

/// Record key holding the level.
pub const LEVEL_KEY: &str = "level";
/// Record key holding the error message.
pub const MESSAGE_KEY: &str = "msg";
/// Record key holding a flattened internal error payload.
pub const ERROR_KEY: &str = "error";
/// Record key holding the request correlation identifier.
pub const REQUEST_ID_KEY: &str = "request_id";

/// Result of a logger call.
pub type LogResult = Result<(), LogError>;

/// Structured log event handed to [`Logger::emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Severity; `None` for unleveled records.
    pub level: Option<EventLevel>,
    /// Call-site pairs, merged after the logger's context pairs.
    pub fields: KeyValues,
}

impl LogEvent {
    /// Leveled event.
    #[must_use]
    pub const fn new(level: EventLevel, fields: KeyValues) -> Self {
        Self {
            level: Some(level),
            fields,
        }
    }

    /// Event without a `level` key.
    #[must_use]
    pub const fn unleveled(fields: KeyValues) -> Self {
        Self {
            level: None,
            fields,
        }
    }
}

/// Boundary contract for structured logging.
///
/// Every call that produces output produces exactly one record. Context
/// pairs come first, then the level, then call-site pairs; on key collision
/// the later pair wins.
pub trait Logger: Send + Sync {
    /// Emit one `info`, `warning` or unleveled record.
    fn emit(&self, event: LogEvent) -> LogResult;

    /// Log an error value.
    ///
    /// `None` produces no output and succeeds. Otherwise the record carries
    /// `level=error`, the error message under `msg` when there is one, and
    /// whatever structured data the error exposes.
    fn error(&self, error: Option<&(dyn Error + 'static)>, fields: KeyValues) -> LogResult;

    /// Write a `level=fatal` record, then terminate the process with status 1.
    ///
    /// Implementations that write nothing (the no-op logger) return instead.
    fn fatal(&self, fields: KeyValues) -> LogResult;

    /// Create a child logger whose context is this logger's pairs followed by
    /// `fields`. The receiver is not modified.
    fn with(&self, fields: KeyValues) -> Box<dyn Logger>;

    /// Convenience: record without a level.
    fn log(&self, fields: KeyValues) -> LogResult {
        self.emit(LogEvent::unleveled(fields))
    }

    /// Convenience: info record.
    fn info(&self, fields: KeyValues) -> LogResult {
        self.emit(LogEvent::new(EventLevel::Info, fields))
    }

    /// Convenience: warning record.
    fn warn(&self, fields: KeyValues) -> LogResult {
        self.emit(LogEvent::new(EventLevel::Warning, fields))
    }
}
