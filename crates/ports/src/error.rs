//! Logger failure taxonomy.

use kvlog_shared::{AppError, ErrorCode};
use std::fmt;

/// Failure surfaced by a logger call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// Raw alternating key/value input had an odd number of items.
    OddKeyValues {
        /// Number of items supplied.
        len: usize,
    },
    /// The merged record could not be encoded as JSON.
    Encode {
        /// Encoder error description.
        message: String,
    },
}

impl LogError {
    /// Stable error code for this failure.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::OddKeyValues { .. } => ErrorCode::new("log", "odd_key_values"),
            Self::Encode { .. } => ErrorCode::new("log", "encode_failed"),
        }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddKeyValues { len } => {
                write!(formatter, "key/value input must have even length, got {len}")
            },
            Self::Encode { message } => write!(formatter, "log record encoding failed: {message}"),
        }
    }
}

impl std::error::Error for LogError {}

impl From<LogError> for AppError {
    fn from(error: LogError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::new(code, message);

        match error {
            LogError::OddKeyValues { len } => envelope.with_metadata("len", len),
            LogError::Encode { .. } => envelope,
        }
    }
}
