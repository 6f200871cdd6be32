use crate::record::{Level, LogRecord};
use chrono::{Datelike, Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// logcat -v threadtime: MM-DD HH:MM:SS.mmm PID TID LEVEL TAG: message
static THREADTIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<md>\d{2}-\d{2})\s+(?P<hms>\d{2}:\d{2}:\d{2}\.\d{3})\s+(?P<pid>\d+)\s+(?P<tid>\d+)\s+(?P<level>[VDIWEF])\s+(?P<tag>[^:]+):\s+(?P<msg>.*)$",
    )
    .expect("threadtime pattern is valid")
});

/// Parse one `threadtime` line stamped with the current local year.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    parse_line_with_year(line, Local::now().year())
}

/// Parse one `threadtime` line.
///
/// Returns `None` when the line does not match or when month/day/time do not
/// form a real date in `year` (e.g. `02-30`). A miss is not an error; callers
/// substitute [`LogRecord::fallback`].
pub fn parse_line_with_year(line: &str, year: i32) -> Option<LogRecord> {
    let caps = THREADTIME.captures(line.trim())?;

    let stamp = format!("{year}-{} {}", &caps["md"], &caps["hms"]);
    let timestamp = NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S%.3f").ok()?;

    let level = caps["level"].chars().next().and_then(Level::from_char)?;

    Some(LogRecord {
        timestamp,
        pid: caps["pid"].to_string(),
        tid: caps["tid"].to_string(),
        level: Some(level),
        tag: caps["tag"].trim().to_string(),
        message: caps["msg"].to_string(),
    })
}
