//! Config loading helpers (env + file).
//!
//! Precedence (highest wins): env overrides, config file, defaults.

use crate::{LogEnv, LogSinkConfig, apply_env_overrides};
use crate::schema::{parse_log_config_json, parse_log_config_toml};
use kvlog_shared::{AppError, ErrorCode, Result};
use std::path::Path;

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

/// Load the sink config from optional file content and env overrides.
pub fn load_log_config_from_sources(
    config_text: Option<(&str, ConfigFormat)>,
    env: &LogEnv,
) -> Result<LogSinkConfig> {
    let config = match config_text {
        None => LogSinkConfig::default(),
        Some((input, ConfigFormat::Json)) => parse_log_config_json(input)?,
        Some((input, ConfigFormat::Toml)) => parse_log_config_toml(input)?,
    };

    // env is applied last and also validates/normalizes the resulting config.
    apply_env_overrides(config, env).map_err(Into::into)
}

/// Load the sink config from an optional file path and env overrides.
pub fn load_log_config_from_path(
    config_path: Option<&Path>,
    env: &LogEnv,
) -> Result<LogSinkConfig> {
    let Some(path) = config_path else {
        return load_log_config_from_sources(None, env);
    };

    let format = detect_config_format(path)?;
    let text = std::fs::read_to_string(path).map_err(|error| {
        AppError::new(
            ErrorCode::new("config", "config_read_failed"),
            format!("failed to read config file: {error}"),
        )
        .with_metadata("path", path.display().to_string())
    })?;
    load_log_config_from_sources(Some((&text, format)), env)
}

/// Load the sink config from the process environment and an optional file path.
pub fn load_log_config_std_env(config_path: Option<&Path>) -> Result<LogSinkConfig> {
    let env = LogEnv::from_std_env().map_err(AppError::from)?;
    load_log_config_from_path(config_path, &env)
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        _ => Err(AppError::new(
            ErrorCode::new("config", "unsupported_config_format"),
            "config file must be .json or .toml",
        )
        .with_metadata("path", path.display().to_string())),
    }
}
