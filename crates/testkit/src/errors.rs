//! Test fixtures for application and opaque errors.

use kvlog_flatten_derive::Flatten;
use kvlog_shared::{AppError, ErrorCode};
use serde_json::json;
use std::fmt;

/// Return a list of common error codes used in tests.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::invalid_input(),
        ErrorCode::not_found(),
        ErrorCode::permission_denied(),
        ErrorCode::internal(),
    ]
}

/// Structured payload attached to application errors in tests.
#[derive(Debug, Clone, Flatten)]
pub struct FailedCharge {
    /// Account the charge was attempted against.
    pub account_id: String,
    /// Charge amount in cents.
    pub amount_cents: u64,
    /// Provider decline reason, when one was returned.
    pub decline_reason: Option<String>,
    attempts: u32,
}

impl FailedCharge {
    /// A declined charge fixture.
    pub fn declined() -> Self {
        Self {
            account_id: "acc-1".to_string(),
            amount_cents: 1250,
            decline_reason: Some("insufficient_funds".to_string()),
            attempts: 3,
        }
    }

    /// Number of attempts made (never flattened).
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Application error "finciero error" with metadata `hi=ho`.
pub fn finciero_error() -> AppError {
    AppError::internal_server("finciero error").with_metadata("hi", "ho")
}

/// Application error with a nested metadata value.
pub fn nested_metadata_error() -> AppError {
    finciero_error().with_metadata("ho", json!({ "foo": "bar" }))
}

/// Application error carrying a structured internal payload.
pub fn payload_error() -> AppError {
    AppError::internal_server("charge failed").with_internal(FailedCharge::declined())
}

/// An error outside the application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueError(pub String);

impl OpaqueError {
    /// Opaque error with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl fmt::Display for OpaqueError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl std::error::Error for OpaqueError {}
