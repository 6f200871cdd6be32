use crate::record::RotationKey;
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;

fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_milli_opt(h, m, s, ms)
        .unwrap()
}

#[test]
fn bucket_is_floored_to_five_minutes() {
    let key = RotationKey::for_timestamp(&at(10, 23, 45, 123));

    assert_eq!(key.bucket, "2024-01-15_10-20");
    assert_eq!(key.minute, "2024-01-15_10-23");
    assert_eq!(key.file_name("logcat"), "logcat_2024-01-15_10-23.csv");
}

#[test]
fn records_crossing_a_bucket_boundary_split_directories() {
    // 4m59s apart, straddling 10:25:00
    let a = RotationKey::for_timestamp(&at(10, 24, 30, 0));
    let b = RotationKey::for_timestamp(&at(10, 29, 29, 0));

    assert_eq!(a.bucket, "2024-01-15_10-20");
    assert_eq!(b.bucket, "2024-01-15_10-25");
    assert_ne!(a.bucket, b.bucket);
}

#[test]
fn records_within_one_bucket_share_a_directory() {
    // 59s apart, same 5-minute window
    let a = RotationKey::for_timestamp(&at(10, 26, 0, 0));
    let b = RotationKey::for_timestamp(&at(10, 26, 59, 0));

    assert_eq!(a.bucket, b.bucket);
    assert_eq!(a.minute, b.minute);
}

#[test]
fn top_of_hour_is_its_own_bucket() {
    let key = RotationKey::for_timestamp(&at(0, 0, 0, 0));
    assert_eq!(key.bucket, "2024-01-15_00-00");
    assert_eq!(key.minute, "2024-01-15_00-00");
}
