//! Record Lifecycle Tests
//!
//! Write-once create and read-by-id through the dispatcher:
//! - created records read back with filterable fields lowercased
//! - a second create for the same id is rejected and changes nothing
//! - blank arguments are rejected by position and persist nothing
//! - reading an unknown id yields a structured not-found payload

use std::sync::Arc;

use infoshare::api::{InfoShareHandler, Response};
use infoshare::record::{InfoRecord, CREATE_ARG_COUNT};
use infoshare::state::{MemoryStateStore, StateStore};

// =============================================================================
// Test Utilities
// =============================================================================

fn new_handler() -> InfoShareHandler<MemoryStateStore> {
    InfoShareHandler::new(Arc::new(MemoryStateStore::new()))
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn read_record(handler: &InfoShareHandler<MemoryStateStore>, id: &str) -> InfoRecord {
    let resp = handler.invoke("readById", &args(&[id]));
    let payload = resp.payload().expect("read should succeed");
    InfoRecord::from_bytes(payload).unwrap()
}

// =============================================================================
// Create then read
// =============================================================================

#[test]
fn test_created_record_reads_back_normalized() {
    let handler = new_handler();

    let resp = handler.invoke(
        "create",
        &args(&["420106", "Weather", "sunny", "10:10", "Bob", "AirForce"]),
    );
    assert_eq!(resp, Response::ok());

    let record = read_record(&handler, "420106");
    assert_eq!(record.doc_type, "info");
    assert_eq!(record.id, "420106");
    assert_eq!(record.category, "weather");
    assert_eq!(record.content, "sunny");
    assert_eq!(record.timestamp, "10:10");
    assert_eq!(record.submitter, "bob");
    assert_eq!(record.group, "airforce");
}

#[test]
fn test_read_returns_stored_bytes_unmodified() {
    let handler = new_handler();
    handler.invoke("create", &args(&["7", "News", "Mixed Case", "t", "Ann", "Ops"]));

    let stored = handler.backend().get("7").unwrap().unwrap();
    let resp = handler.invoke("readById", &args(&["7"]));

    assert_eq!(resp.payload(), Some(stored.as_slice()));
    assert_eq!(
        String::from_utf8(stored).unwrap(),
        r#"{"docType":"info","InfoID":"7","InfoType":"news","Content":"Mixed Case","UploadTime":"t","Uploader":"ann","Department":"ops"}"#
    );
}

// =============================================================================
// Write-once
// =============================================================================

#[test]
fn test_duplicate_create_keeps_first_record() {
    let handler = new_handler();

    let first = handler.invoke("create", &args(&["1", "a", "b", "c", "d", "e"]));
    assert!(first.is_success());

    let second = handler.invoke("create", &args(&["1", "a", "b", "c", "d", "e"]));
    assert_eq!(second.error_code(), Some("INFO_DUPLICATE_KEY"));
    assert_eq!(second.error_message(), Some("This info already exists: 1"));

    let third = handler.invoke("create", &args(&["1", "z", "z", "z", "z", "z"]));
    assert!(!third.is_success());

    let record = read_record(&handler, "1");
    assert_eq!(record.category, "a");
    assert_eq!(record.group, "e");
    assert_eq!(handler.backend().len(), 1);
}

// =============================================================================
// Argument validation
// =============================================================================

#[test]
fn test_each_blank_argument_rejected_by_ordinal() {
    let ordinals = ["1st", "2nd", "3rd", "4th", "5th", "6th"];

    for position in 0..CREATE_ARG_COUNT {
        let handler = new_handler();
        let mut values = args(&["1", "a", "b", "c", "d", "e"]);
        values[position] = String::new();

        let resp = handler.invoke("create", &values);
        assert_eq!(resp.error_code(), Some("INFO_ARGUMENT_EMPTY"));
        assert_eq!(
            resp.error_message().unwrap(),
            format!("{} argument must be a non-empty string", ordinals[position])
        );
        assert!(
            handler.backend().is_empty(),
            "blank argument {} must persist nothing",
            position + 1
        );
    }
}

#[test]
fn test_first_blank_argument_wins() {
    let handler = new_handler();
    let resp = handler.invoke("create", &args(&["1", "a", "", "c", "", "e"]));
    assert_eq!(
        resp.error_message(),
        Some("3rd argument must be a non-empty string")
    );
}

#[test]
fn test_wrong_argument_count() {
    let handler = new_handler();

    for count in [0, 5, 7] {
        let values: Vec<String> = (0..count).map(|i| format!("v{}", i)).collect();
        let resp = handler.invoke("create", &values);
        assert_eq!(
            resp.error_message(),
            Some("Incorrect number of arguments. Expecting 6"),
            "count {}",
            count
        );
    }
    assert!(handler.backend().is_empty());
}

// =============================================================================
// Not found
// =============================================================================

#[test]
fn test_unknown_id_yields_structured_error() {
    let handler = new_handler();
    let resp = handler.invoke("readById", &args(&["999"]));

    assert_eq!(resp.error_code(), Some("INFO_NOT_FOUND"));
    let payload: serde_json::Value =
        serde_json::from_str(resp.error_message().unwrap()).unwrap();
    assert_eq!(payload["Error"], "Info does not exist: 999");
}

#[test]
fn test_backend_read_failure_yields_structured_error() {
    let handler = new_handler();
    handler.backend().set_fail_reads(true);

    let resp = handler.invoke("readById", &args(&["1"]));
    assert_eq!(resp.error_code(), Some("INFO_NOT_FOUND"));
    assert_eq!(
        resp.error_message(),
        Some(r#"{"Error":"Failed to get state for 1"}"#)
    );
}

#[test]
fn test_existence_check_failure_is_backend_failure() {
    let handler = new_handler();
    handler.backend().set_fail_reads(true);

    let resp = handler.invoke("create", &args(&["1", "a", "b", "c", "d", "e"]));
    assert_eq!(resp.error_code(), Some("INFO_BACKEND_FAILURE"));
    assert!(resp
        .error_message()
        .unwrap()
        .starts_with("Failed to get info: "));
}
