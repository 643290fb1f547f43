//! In-memory sink and exit hook for logger tests.
//!
//! These implementations are intended for:
//! - asserting on exact output lines without touching stderr
//! - observing `fatal` without ending the test process

use kvlog_adapters::{JsonLogger, LogSink, ProcessExit};
use kvlog_ports::KeyValues;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Log sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("memory sink lock").clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().expect("memory sink lock");
        std::mem::take(&mut *guard)
    }

    /// Drain the captured lines, parsing each as JSON.
    pub fn take_records(&self) -> Vec<Value> {
        self.take()
            .iter()
            .map(|line| serde_json::from_str(line).expect("log line is valid JSON"))
            .collect()
    }

    /// Number of lines written so far.
    pub fn len(&self) -> usize {
        self.lines.lock().expect("memory sink lock").len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemoryLogSink {
    fn write_line(&self, line: &str) {
        let mut guard = self.lines.lock().expect("memory sink lock");
        guard.push(line.to_string());
    }
}

/// Exit hook that records requested exit codes instead of exiting.
#[derive(Debug, Default)]
pub struct RecordingExit {
    codes: Mutex<Vec<i32>>,
}

impl RecordingExit {
    /// Exit codes requested so far.
    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().expect("exit lock").clone()
    }
}

impl ProcessExit for RecordingExit {
    fn exit(&self, code: i32) {
        self.codes.lock().expect("exit lock").push(code);
    }
}

/// A JSON logger wired to in-memory collaborators.
pub struct MemoryLogger {
    /// Logger under test.
    pub logger: JsonLogger,
    /// Captured output.
    pub sink: Arc<MemoryLogSink>,
    /// Captured exit requests.
    pub exit: Arc<RecordingExit>,
}

/// Build a JSON logger with `context`, capturing output and exit requests.
pub fn memory_logger(context: KeyValues) -> MemoryLogger {
    let sink = Arc::new(MemoryLogSink::default());
    let exit = Arc::new(RecordingExit::default());
    let logger = JsonLogger::new(sink.clone())
        .with_exit(exit.clone())
        .with_context(context);
    MemoryLogger { logger, sink, exit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvlog_ports::{Logger, kv};

    #[test]
    fn memory_sink_captures_lines() {
        let sink = MemoryLogSink::default();
        sink.write_line("hello\n");
        sink.write_line("world\n");

        assert_eq!(sink.len(), 2);
        let lines = sink.take();
        assert_eq!(lines, vec!["hello\n".to_string(), "world\n".to_string()]);
        assert!(sink.is_empty());
    }

    #[test]
    fn memory_logger_captures_fatal() {
        let capture = memory_logger(kv!["foo" => "bar"]);
        capture.logger.fatal(kv![]).unwrap();

        assert_eq!(capture.sink.lines(), vec![
            "{\"foo\":\"bar\",\"level\":\"fatal\"}\n".to_string()
        ]);
        assert_eq!(capture.exit.codes(), vec![1]);
    }
}
