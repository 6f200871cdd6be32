use chrono::{DateTime, Local};

pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const MAX_REASON_LEN: usize = 64;

/// Reduce a free-form reason to a lowercase, filename-safe token.
///
/// ASCII alphanumerics, `.`, `-` and `_` are kept; every other run of
/// characters becomes a single `-`. Returns `None` if nothing usable remains.
pub fn sanitize_reason(reason: &str) -> Option<String> {
    let mut out = String::with_capacity(reason.len().min(MAX_REASON_LEN));

    for c in reason.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    let mut token: String = out.trim_matches('-').chars().take(MAX_REASON_LEN).collect();
    while token.ends_with('-') {
        token.pop();
    }

    if token.is_empty() { None } else { Some(token) }
}

/// `snapshot_<timestamp>[_<reason>].<ext>`
pub fn artifact_name(at: &DateTime<Local>, reason: Option<&str>, extension: &str) -> String {
    let stamp = at.format(ARTIFACT_TIMESTAMP_FORMAT);
    match reason.and_then(sanitize_reason) {
        Some(reason) => format!("snapshot_{stamp}_{reason}.{extension}"),
        None => format!("snapshot_{stamp}.{extension}"),
    }
}
