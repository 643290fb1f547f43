//! Error value decomposition into log record pairs.
//!
//! An [`AppError`] is decomposed into its message, one pair per metadata
//! entry, and its flattened internal payload under `error`. Any other error
//! contributes only its display text, and nothing at all when that text is
//! empty.

use kvlog_ports::{ERROR_KEY, KeyValues};
use kvlog_shared::AppError;
use serde_json::Value;
use std::error::Error;

/// Record data extracted from an error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptedError {
    /// Top-level message, emitted under `msg` when present.
    pub message: Option<String>,
    /// Extra pairs appended after the call-site pairs.
    pub fields: KeyValues,
}

/// Decompose an error into record data.
///
/// Returns `None` when there is no error, in which case nothing is logged.
pub fn adapt_error(error: Option<&(dyn Error + 'static)>) -> Option<AdaptedError> {
    let error = error?;

    if let Some(app_error) = error.downcast_ref::<AppError>() {
        return Some(adapt_app_error(app_error));
    }

    let message = error.to_string();
    Some(AdaptedError {
        message: (!message.is_empty()).then_some(message),
        fields: KeyValues::new(),
    })
}

/// Decompose a structured application error.
pub fn adapt_app_error(error: &AppError) -> AdaptedError {
    let mut fields = KeyValues::with_capacity(error.metadata.len() + 1);
    for (key, value) in &error.metadata {
        fields.push(key.as_str(), value.clone());
    }
    if let Some(payload) = error.flattened_internal() {
        fields.push(ERROR_KEY, Value::Object(payload));
    }

    AdaptedError {
        message: Some(error.message.clone()),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvlog_shared::{FieldValue, Flatten, FlattenedRecord};
    use serde_json::json;
    use std::fmt;

    #[derive(Debug)]
    struct PlainError(&'static str);

    impl fmt::Display for PlainError {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str(self.0)
        }
    }

    impl Error for PlainError {}

    struct Leaf {
        a: i64,
    }

    impl Flatten for Leaf {
        fn flatten(&self) -> FlattenedRecord {
            let mut record = FlattenedRecord::new();
            record.insert("a".to_string(), self.a.to_field_value());
            record
        }
    }

    #[test]
    fn absent_error_has_no_output() {
        assert_eq!(adapt_error(None), None);
    }

    #[test]
    fn app_error_metadata_becomes_pairs() {
        let error = AppError::internal_server("finciero error").with_metadata("hi", "ho");
        let adapted = adapt_error(Some(&error));

        assert_eq!(
            adapted,
            Some(AdaptedError {
                message: Some("finciero error".to_string()),
                fields: kvlog_ports::kv!["hi" => "ho"],
            })
        );
    }

    #[test]
    fn app_error_without_metadata_still_has_message() {
        let error = AppError::not_found("finciero error");
        let adapted = adapt_error(Some(&error));

        assert_eq!(
            adapted.as_ref().and_then(|adapted| adapted.message.as_deref()),
            Some("finciero error")
        );
        assert_eq!(adapted.map(|adapted| adapted.fields.len()), Some(0));
    }

    #[test]
    fn nested_metadata_is_kept_as_is() {
        let error = AppError::internal_server("finciero error")
            .with_metadata("hi", "ho")
            .with_metadata("ho", json!({ "foo": "bar" }));
        let Some(adapted) = adapt_error(Some(&error)) else {
            unreachable!("app errors always produce output");
        };

        assert_eq!(adapted.fields.resolve("ho"), Some(&json!({ "foo": "bar" })));
        assert_eq!(adapted.fields.resolve("hi"), Some(&json!("ho")));
    }

    #[test]
    fn internal_payload_is_attached_under_error() {
        let error = AppError::internal_server("finciero error")
            .with_metadata("hi", "ho")
            .with_internal(Leaf { a: 3 });
        let Some(adapted) = adapt_error(Some(&error)) else {
            unreachable!("app errors always produce output");
        };

        let keys: Vec<&str> = adapted.fields.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["hi", "error"]);
        assert_eq!(adapted.fields.resolve("error"), Some(&json!({ "a": 3 })));
    }

    #[test]
    fn opaque_error_uses_display_text() {
        let error = PlainError("error");
        let adapted = adapt_error(Some(&error));

        assert_eq!(
            adapted,
            Some(AdaptedError {
                message: Some("error".to_string()),
                fields: KeyValues::new(),
            })
        );
    }

    #[test]
    fn opaque_error_with_empty_text_omits_message() {
        let error = PlainError("");
        let adapted = adapt_error(Some(&error));

        assert_eq!(
            adapted,
            Some(AdaptedError {
                message: None,
                fields: KeyValues::new(),
            })
        );
    }
}
