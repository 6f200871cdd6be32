//! Structured log records.
//!
//! Every line read from the capture stream becomes exactly one [`LogRecord`]:
//! either parsed from the `threadtime` layout or synthesized as a fallback
//! carrying the raw text. Records also know which output file they belong to
//! through their [`RotationKey`].

mod level;
mod parse;
mod rotation_key;

#[cfg(test)]
mod tests;

pub use level::Level;
pub use parse::{parse_line, parse_line_with_year};
pub use rotation_key::RotationKey;

use chrono::{Local, NaiveDateTime};

/// Timestamp layout used when records are persisted.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Local wall-clock time with millisecond precision.
    pub timestamp: NaiveDateTime,
    pub pid: String,
    pub tid: String,
    /// `None` for fallback records.
    pub level: Option<Level>,
    pub tag: String,
    pub message: String,
}

impl LogRecord {
    /// Build the record used when a line does not match the expected layout.
    ///
    /// The timestamp is the ingestion time and the message is the trimmed line,
    /// so nothing read from the stream is ever dropped.
    pub fn fallback(raw: &str) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            pid: String::new(),
            tid: String::new(),
            level: None,
            tag: String::new(),
            message: raw.trim().to_string(),
        }
    }

    /// Parse `raw`, falling back to [`LogRecord::fallback`] on a miss.
    pub fn from_line(raw: &str) -> Self {
        parse_line(raw).unwrap_or_else(|| Self::fallback(raw))
    }

    pub fn is_parsed(&self) -> bool {
        self.level.is_some()
    }

    pub fn rotation_key(&self) -> RotationKey {
        RotationKey::for_timestamp(&self.timestamp)
    }

    /// Minute granularity key, used to detect minute rollover between records.
    pub fn minute_key(&self) -> String {
        self.rotation_key().minute
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn level_str(&self) -> &'static str {
        self.level.map(Level::as_str).unwrap_or("")
    }
}
