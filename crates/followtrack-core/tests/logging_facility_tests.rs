#![allow(clippy::unwrap_used, clippy::expect_used)]

use followtrack_core::errors::{ExError, ExErrorKind, TrackerError};
use followtrack_core::logging_facility::test_capture::init_test_capture;
use followtrack_core::{log_op_end, log_op_error, log_op_start};
use followtrack_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, owner_id = 7);

    let starts: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .collect();
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].field("owner_id"), Some("7"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42, snapshot_id = 3);

    let ends = capture.events_for_op(op_name);
    assert_eq!(ends.len(), 1, "Should have exactly one end event");
    assert_eq!(ends[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(ends[0].field(FIELD_DURATION_MS), Some("42"));
    assert_eq!(ends[0].field("snapshot_id"), Some("3"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = TrackerError::DuplicateUsername {
        username: "alice".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let event = &capture.events_for_op(op_name)[0];
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_INVALID_INPUT"));
    assert!(event.field("err.kind").unwrap().contains("InvalidInput"));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::Persistence).with_message("disk full");
    log_op_error!(op_name, err, duration_ms = 1);

    let count = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.field("err.message") == Some("disk full")
    });
    assert_eq!(count, 1);
}
