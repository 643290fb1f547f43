//! # kvlog-ports
//!
//! Logger capability trait and record model for the kvlog workspace.
//!
//! This crate defines the interface callers depend on. Concrete loggers live
//! in `kvlog-adapters`. It depends only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod error;
pub mod logger;
pub mod pairs;

pub use error::*;
pub use logger::*;
pub use pairs::*;

#[cfg(test)]
mod tests {
    use super::*;
    use kvlog_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;
        let mut in_dev_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                in_dev_deps = line == "[dev-dependencies]";
                continue;
            }
            if !(in_deps || in_dev_deps) {
                continue;
            }
            if line.starts_with("kvlog") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn ports_depends_only_on_shared() {
        let deps = workspace_deps();
        let allowed = ["kvlog-shared"];

        for dep in &deps {
            assert!(
                allowed.contains(&dep.as_str()),
                "unexpected dependency found: {dep}"
            );
        }

        for expected in allowed {
            assert!(
                deps.iter().any(|dep| dep == expected),
                "missing dependency: {expected}"
            );
        }
    }

    const fn assert_eq_impl<T: Eq>() {}

    #[test]
    fn record_model_types_are_eq() {
        assert_eq_impl::<KeyValues>();
        assert_eq_impl::<LogEvent>();
        assert_eq_impl::<LogError>();
        assert_eq_impl::<EventLevel>();
    }

    #[test]
    fn ports_crate_compiles() {
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
