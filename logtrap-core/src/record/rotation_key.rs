use chrono::{NaiveDateTime, Timelike};

const KEY_FORMAT: &str = "%Y-%m-%d_%H-%M";
const BUCKET_MINUTES: u32 = 5;

/// Identifies the output file a record belongs to.
///
/// `bucket` names the 5-minute directory, `minute` the 1-minute file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RotationKey {
    pub bucket: String,
    pub minute: String,
}

impl RotationKey {
    pub fn for_timestamp(ts: &NaiveDateTime) -> Self {
        let minute_start = ts
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(*ts);

        let bucket_start = minute_start
            .with_minute((minute_start.minute() / BUCKET_MINUTES) * BUCKET_MINUTES)
            .unwrap_or(minute_start);

        Self {
            bucket: bucket_start.format(KEY_FORMAT).to_string(),
            minute: minute_start.format(KEY_FORMAT).to_string(),
        }
    }

    /// `<prefix>_<minute>.csv`
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{prefix}_{}.csv", self.minute)
    }
}
