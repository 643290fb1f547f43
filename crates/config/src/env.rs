//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: present-but-invalid values fail fast. Values are
//! read through an explicit map so callers (and tests) control the source.

use crate::schema::{ConfigSchemaError, LogSinkConfig};
use kvlog_shared::{AppError, ErrorCode};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: timestamp key added to every record.
pub const ENV_LOG_TIMESTAMP_KEY: &str = "KVLOG_TIMESTAMP_KEY";

/// Parsed env overrides for the sink config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEnv {
    /// Timestamp key override.
    pub timestamp_key: Option<Box<str>>,
}

impl LogEnv {
    /// Parse overrides from a key/value map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            timestamp_key: parse_optional_trimmed_string(map, ENV_LOG_TIMESTAMP_KEY)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        if let Ok(value) = std::env::var(ENV_LOG_TIMESTAMP_KEY) {
            map.insert(ENV_LOG_TIMESTAMP_KEY.to_string(), value);
        }
        Self::from_map(&map)
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: LogSinkConfig,
    env: &LogEnv,
) -> Result<LogSinkConfig, ConfigSchemaError> {
    let mut config = base;
    if let Some(key) = env.timestamp_key.as_deref() {
        tracing::debug!(var = ENV_LOG_TIMESTAMP_KEY, key, "timestamp key overridden from env");
        config.timestamp_key = Some(key.to_string());
    }

    config.validate_and_normalize()
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for AppError {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::new(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_no_overrides() -> Result<(), Box<dyn Error>> {
        let env = LogEnv::from_map(&BTreeMap::new())?;
        assert_eq!(env, LogEnv::default());
        Ok(())
    }

    #[test]
    fn overrides_are_parsed() -> Result<(), Box<dyn Error>> {
        let env = LogEnv::from_map(&env_map(&[(ENV_LOG_TIMESTAMP_KEY, " ts ")]))?;
        assert_eq!(env.timestamp_key.as_deref(), Some("ts"));
        Ok(())
    }

    #[test]
    fn unrelated_vars_are_ignored() -> Result<(), Box<dyn Error>> {
        let env = LogEnv::from_map(&env_map(&[("KVLOG_TARGET", "stdout")]))?;
        assert_eq!(env, LogEnv::default());
        Ok(())
    }

    #[test]
    fn blank_value_fails_fast() {
        let error = LogEnv::from_map(&env_map(&[(ENV_LOG_TIMESTAMP_KEY, "   ")])).err();
        assert_eq!(
            error,
            Some(EnvParseError::EmptyValue {
                var: ENV_LOG_TIMESTAMP_KEY
            })
        );
    }

    #[test]
    fn env_wins_over_base_config() -> Result<(), Box<dyn Error>> {
        let base = LogSinkConfig {
            timestamp_key: Some("time".to_string()),
        };
        let env = LogEnv {
            timestamp_key: Some("ts".into()),
        };

        let config = apply_env_overrides(base, &env)?;
        assert_eq!(config.timestamp_key.as_deref(), Some("ts"));
        Ok(())
    }

    #[test]
    fn env_errors_map_to_app_error() {
        let error: AppError = EnvParseError::EmptyValue {
            var: ENV_LOG_TIMESTAMP_KEY,
        }
        .into();
        assert_eq!(error.code, ErrorCode::new("config", "empty_env_var"));
        assert_eq!(
            error.metadata.get("env_var"),
            Some(&serde_json::json!(ENV_LOG_TIMESTAMP_KEY))
        );
    }
}
