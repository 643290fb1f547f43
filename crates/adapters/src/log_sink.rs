//! Log sinks receiving encoded record lines.

use std::io::Write;
use std::sync::Mutex;

/// A sink that receives pre-formatted log lines.
///
/// Each call carries exactly one complete line. Implementations must write it
/// with a single locked write so concurrent records never interleave.
pub trait LogSink: Send + Sync {
    /// Write a line to the sink.
    fn write_line(&self, line: &str);
}

/// Log sink that writes to stderr.
#[derive(Debug, Default)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) {
        let mut stderr = std::io::stderr().lock();
        if let Err(error) = stderr.write_all(line.as_bytes()).and_then(|()| stderr.flush()) {
            tracing::warn!(%error, "stderr log sink write failed");
        }
    }
}

/// Log sink over any writer, serialized by a mutex (used by tests and embedders).
#[derive(Debug)]
pub struct WriterLogSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterLogSink<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogSink for WriterLogSink<W> {
    fn write_line(&self, line: &str) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Err(error) = writer.write_all(line.as_bytes()).and_then(|()| writer.flush()) {
            tracing::warn!(%error, "writer log sink write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn writer_sink_captures_lines() {
        let sink = WriterLogSink::new(Vec::<u8>::new());
        sink.write_line("hello\n");
        sink.write_line("world\n");

        let bytes = sink.into_inner();
        assert_eq!(String::from_utf8_lossy(&bytes), "hello\nworld\n");
    }

    #[test]
    fn concurrent_lines_do_not_interleave() {
        let sink = Arc::new(WriterLogSink::new(Vec::<u8>::new()));
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    let line = format!("{}\n", worker.to_string().repeat(64));
                    for _ in 0..50 {
                        sink.write_line(&line);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread");
        }

        let sink = Arc::into_inner(sink).expect("sole owner");
        let text = String::from_utf8(sink.into_inner()).expect("utf8 output");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 400);
        for line in lines {
            let first = line.chars().next().expect("non-empty line");
            assert!(line.chars().all(|c| c == first), "interleaved line: {line}");
        }
    }
}
