//! Sink configuration schema, defaults, and validation.
//!
//! Records always go to stderr; the only sink option is the timestamp key,
//! absent by default. Deserialization is strict (`deny_unknown_fields`).

use kvlog_shared::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record keys a timestamp must not shadow.
pub const RESERVED_RECORD_KEYS: [&str; 4] = ["level", "msg", "error", "request_id"];

/// Sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LogSinkConfig {
    /// When set, every record carries the emission time (Unix epoch
    /// milliseconds) under this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_key: Option<String>,
}

impl LogSinkConfig {
    /// Validate and normalize (trims the timestamp key).
    pub fn validate_and_normalize(mut self) -> Result<Self, ConfigSchemaError> {
        if let Some(key) = self.timestamp_key.take() {
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigSchemaError::EmptyTimestampKey);
            }
            if RESERVED_RECORD_KEYS.contains(&key) {
                return Err(ConfigSchemaError::ReservedTimestampKey {
                    key: key.to_string(),
                });
            }
            self.timestamp_key = Some(key.to_string());
        }
        Ok(self)
    }
}

/// Parse a sink config from JSON and validate it.
pub fn parse_log_config_json(input: &str) -> Result<LogSinkConfig, ConfigSchemaError> {
    let config: LogSinkConfig =
        serde_json::from_str(input).map_err(|error| ConfigSchemaError::Parse {
            format: "json",
            message: error.to_string(),
        })?;
    config.validate_and_normalize()
}

/// Parse a sink config from TOML and validate it.
pub fn parse_log_config_toml(input: &str) -> Result<LogSinkConfig, ConfigSchemaError> {
    let config: LogSinkConfig =
        toml::from_str(input).map_err(|error| ConfigSchemaError::Parse {
            format: "toml",
            message: error.to_string(),
        })?;
    config.validate_and_normalize()
}

/// Validation failures for the sink config schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The input could not be deserialized.
    Parse {
        /// Input format (`json` or `toml`).
        format: &'static str,
        /// Deserializer message.
        message: String,
    },
    /// The timestamp key was empty after trimming.
    EmptyTimestampKey,
    /// The timestamp key collides with a key the logger writes itself.
    ReservedTimestampKey {
        /// Offending key.
        key: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Parse { .. } => ErrorCode::new("config", "invalid_config"),
            Self::EmptyTimestampKey => ErrorCode::new("config", "empty_timestamp_key"),
            Self::ReservedTimestampKey { .. } => {
                ErrorCode::new("config", "reserved_timestamp_key")
            },
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { format, message } => {
                write!(formatter, "invalid {format} config: {message}")
            },
            Self::EmptyTimestampKey => formatter.write_str("timestampKey must be non-empty"),
            Self::ReservedTimestampKey { key } => {
                write!(formatter, "timestampKey `{key}` is reserved")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for AppError {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::new(code, message);

        match error {
            ConfigSchemaError::Parse { format, .. } => envelope.with_metadata("format", format),
            ConfigSchemaError::EmptyTimestampKey => envelope.with_metadata("field", "timestampKey"),
            ConfigSchemaError::ReservedTimestampKey { key } => envelope
                .with_metadata("field", "timestampKey")
                .with_metadata("value", key),
        }
    }
}
