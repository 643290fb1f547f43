//! # kvlog-config
//!
//! Sink configuration schema, env overrides, and loading.
//! This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{ENV_LOG_TIMESTAMP_KEY, EnvParseError, LogEnv, apply_env_overrides};
pub use load::{
    ConfigFormat, load_log_config_from_path, load_log_config_from_sources,
    load_log_config_std_env,
};
pub use schema::{
    ConfigSchemaError, LogSinkConfig, RESERVED_RECORD_KEYS, parse_log_config_json,
    parse_log_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
