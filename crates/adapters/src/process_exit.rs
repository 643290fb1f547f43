//! Process termination seam used by fatal records.

/// Exit status used after a fatal record.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Terminates the process.
///
/// Production code uses [`StdProcessExit`]; tests substitute a recorder so a
/// fatal call can be observed without ending the test binary.
pub trait ProcessExit: Send + Sync {
    /// Terminate with `code`.
    fn exit(&self, code: i32);
}

/// Exits through [`std::process::exit`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdProcessExit;

impl ProcessExit for StdProcessExit {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}
