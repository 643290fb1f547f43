//! Logger that discards everything.

use kvlog_ports::{KeyValues, LogEvent, LogResult, Logger};
use std::error::Error;

/// Logger with no output and no side effects.
///
/// `fatal` returns instead of exiting.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn emit(&self, _event: LogEvent) -> LogResult {
        Ok(())
    }

    fn error(&self, _error: Option<&(dyn Error + 'static)>, _fields: KeyValues) -> LogResult {
        Ok(())
    }

    fn fatal(&self, _fields: KeyValues) -> LogResult {
        Ok(())
    }

    fn with(&self, _fields: KeyValues) -> Box<dyn Logger> {
        Box::new(Self)
    }
}
