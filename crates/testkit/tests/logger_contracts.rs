//! Contract tests for the JSON logger through in-memory collaborators.

use kvlog_ports::{Logger, kv};
use kvlog_testkit::errors::{FailedCharge, OpaqueError, finciero_error, payload_error};
use kvlog_testkit::memory_logger;
use serde_json::json;

#[test]
fn app_error_payload_lands_under_error_key() {
    let capture = memory_logger(kv!["foo" => "bar"]);
    let error = payload_error();

    capture.logger.error(Some(&error), kv![]).unwrap();

    assert_eq!(capture.sink.take_records(), vec![json!({
        "error": {
            "account_id": "acc-1",
            "amount_cents": 1250,
            "decline_reason": "insufficient_funds",
        },
        "foo": "bar",
        "level": "error",
        "msg": "charge failed",
    })]);
}

#[test]
fn private_payload_fields_are_not_logged() {
    let charge = FailedCharge::declined();
    assert_eq!(charge.attempts(), 3);

    let record = kvlog_shared::Flatten::flatten(&charge);
    assert!(!record.contains_key("attempts"));
    assert_eq!(record.len(), 3);
}

#[test]
fn finciero_error_fixture_is_logged_flat() {
    let capture = memory_logger(kv!["foo" => "bar"]);

    capture.logger.error(Some(&finciero_error()), kv![]).unwrap();

    assert_eq!(
        capture.sink.take(),
        vec!["{\"foo\":\"bar\",\"hi\":\"ho\",\"level\":\"error\",\"msg\":\"finciero error\"}\n".to_string()]
    );
}

#[test]
fn opaque_error_contributes_only_its_text() {
    let capture = memory_logger(kv![]);

    capture
        .logger
        .error(Some(&OpaqueError::new("disk full")), kv!["path" => "/tmp"])
        .unwrap();

    assert_eq!(capture.sink.take_records(), vec![json!({
        "level": "error",
        "msg": "disk full",
        "path": "/tmp",
    })]);
}

#[test]
fn child_loggers_share_the_sink() {
    let capture = memory_logger(kv!["service" => "billing"]);
    let child = capture.logger.with(kv!["request_id" => "r-1"]);
    let grandchild = child.with(kv!["step" => 2]);

    grandchild.warn(kv![]).unwrap();
    capture.logger.info(kv![]).unwrap();

    assert_eq!(capture.sink.take_records(), vec![
        json!({ "level": "warning", "request_id": "r-1", "service": "billing", "step": 2 }),
        json!({ "level": "info", "service": "billing" }),
    ]);
    assert!(capture.exit.codes().is_empty());
}
