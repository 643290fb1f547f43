//! Application error value and stable error codes.

use crate::flatten::{Flatten, FlattenedRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Metadata attached to errors for diagnostics.
///
/// Values may be any JSON value, including nested objects.
pub type ErrorMetadata = BTreeMap<String, Value>;

/// Stable error code with namespace and identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a new error code with a namespace and code.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Invalid input code.
    pub fn invalid_input() -> Self {
        Self::new("core", "invalid_input")
    }

    /// Not found code.
    pub fn not_found() -> Self {
        Self::new("core", "not_found")
    }

    /// Permission denied code.
    pub fn permission_denied() -> Self {
        Self::new("core", "permission_denied")
    }

    /// Internal failure code.
    pub fn internal() -> Self {
        Self::new("core", "internal")
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Structured payload wrapped by an [`AppError`].
type InternalPayload = Arc<dyn Flatten + Send + Sync>;

/// Structured application error.
///
/// Carries a human-readable message, free-form metadata, and optionally an
/// internal structured payload that loggers flatten into a nested record.
#[derive(Clone)]
pub struct AppError {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Additional diagnostic metadata.
    pub metadata: ErrorMetadata,
    internal: Option<InternalPayload>,
}

impl AppError {
    /// Create an error with an explicit code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            metadata: ErrorMetadata::new(),
            internal: None,
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::not_found(), message)
    }

    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::invalid_input(), message)
    }

    /// Create an internal server error.
    pub fn internal_server(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::internal(), message)
    }

    /// Attach a single metadata entry. A repeated key replaces the earlier value.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Merge a metadata map into the error.
    #[must_use]
    pub fn with_metadata_map(mut self, metadata: ErrorMetadata) -> Self {
        self.metadata.extend(metadata);
        self
    }

    /// Wrap a structured internal payload.
    #[must_use]
    pub fn with_internal<T>(mut self, payload: T) -> Self
    where
        T: Flatten + Send + Sync + 'static,
    {
        self.internal = Some(Arc::new(payload));
        self
    }

    /// Returns the wrapped internal payload, if any.
    #[must_use]
    pub fn internal(&self) -> Option<&(dyn Flatten + Send + Sync)> {
        self.internal.as_deref()
    }

    /// Returns the flattened internal payload, if any.
    #[must_use]
    pub fn flattened_internal(&self) -> Option<FlattenedRecord> {
        self.internal().map(Flatten::flatten)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AppError")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("metadata", &self.metadata)
            .field("internal", &self.flattened_internal())
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}
