use crate::source::CaptureTool;
use chrono::{Local, NaiveDateTime};
use std::process::Stdio;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const PROBE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// How lines that predate the pipeline start are kept out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartFilter {
    /// The tool filters by itself (`-T <timestamp>`).
    Native(String),

    /// Discard parsed records at or before this local time.
    ClientSide(NaiveDateTime),
}

impl StartFilter {
    pub fn logcat_args(&self) -> Vec<String> {
        match self {
            Self::Native(ts) => vec!["-T".to_string(), ts.clone()],
            Self::ClientSide(_) => Vec::new(),
        }
    }

    pub fn skip_before(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Native(_) => None,
            Self::ClientSide(cutoff) => Some(*cutoff),
        }
    }
}

/// Normalize the device's `date` output, or `None` if it is not a usable
/// start time. Shells without `%N` support echo the directive back; that is
/// read as zero milliseconds.
pub fn parse_probe_output(out: &str) -> Option<String> {
    let ts = out.replace('\r', "");
    let ts = ts.trim().replace("%3N", "000");

    NaiveDateTime::parse_from_str(&ts, PROBE_FORMAT).ok()?;
    Some(ts)
}

/// Ask the device for its current time so the tool can start from there.
pub async fn probe_start_time(tool: &CaptureTool) -> Option<String> {
    let mut cmd = tool.command(["shell", "date \"+%Y-%m-%d %H:%M:%S.%3N\""]);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(PROBE_TIMEOUT, cmd.output()).await {
        Ok(Ok(output)) if output.status.success() => output,
        Ok(Ok(output)) => {
            tracing::debug!(status = %output.status, "start time probe failed");
            return None;
        }
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "start time probe could not run");
            return None;
        }
        Err(_) => {
            tracing::debug!("start time probe timed out");
            return None;
        }
    };

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

pub async fn resolve_start_filter(tool: &CaptureTool) -> StartFilter {
    match probe_start_time(tool).await {
        Some(ts) => {
            tracing::info!(start = %ts, "capture tool filters by start time");
            StartFilter::Native(ts)
        }
        None => {
            let cutoff = Local::now().naive_local();
            tracing::info!(
                cutoff = %cutoff.format(PROBE_FORMAT),
                "start time probe unavailable; skipping older lines client-side"
            );
            StartFilter::ClientSide(cutoff)
        }
    }
}
