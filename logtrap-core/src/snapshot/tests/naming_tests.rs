use crate::snapshot::{MAX_REASON_LEN, artifact_name, sanitize_reason};
use chrono::{Local, TimeZone};
use pretty_assertions::assert_eq;

#[test]
fn reasons_are_lowercased_and_collapsed() {
    assert_eq!(
        sanitize_reason("Java crash: Binder:4300_2").as_deref(),
        Some("java-crash-binder-4300_2")
    );
    assert_eq!(
        sanitize_reason("gatt-congestion-0x8f").as_deref(),
        Some("gatt-congestion-0x8f")
    );
    assert_eq!(sanitize_reason("  --a   b--  ").as_deref(), Some("a-b"));
    assert_eq!(sanitize_reason("v1.2_rc").as_deref(), Some("v1.2_rc"));
}

#[test]
fn unusable_reasons_yield_no_suffix() {
    assert_eq!(sanitize_reason(""), None);
    assert_eq!(sanitize_reason("!!! ***"), None);
    assert_eq!(sanitize_reason("---"), None);
}

#[test]
fn long_reasons_are_truncated() {
    let long = "a".repeat(200);
    assert_eq!(sanitize_reason(&long).unwrap().len(), MAX_REASON_LEN);

    // A cut that lands just after a separator does not leave it dangling.
    let edge = format!("{} tail", "b".repeat(MAX_REASON_LEN - 1));
    let token = sanitize_reason(&edge).unwrap();
    assert_eq!(token, "b".repeat(MAX_REASON_LEN - 1));
}

#[test]
fn artifact_names_carry_time_and_reason() {
    let at = Local.with_ymd_and_hms(2024, 1, 15, 10, 23, 45).unwrap();

    assert_eq!(
        artifact_name(&at, Some("BT Fault"), "zip"),
        "snapshot_2024-01-15_10-23-45_bt-fault.zip"
    );
    assert_eq!(artifact_name(&at, None, "zip"), "snapshot_2024-01-15_10-23-45.zip");
    assert_eq!(artifact_name(&at, Some("%%"), "zip"), "snapshot_2024-01-15_10-23-45.zip");
}
