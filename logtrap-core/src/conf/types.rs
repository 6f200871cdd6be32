use crate::conf::resolve_snapshot_dir;
use crate::retention::{DEFAULT_SWEEP_INTERVAL, RetentionPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Root of the `<bucket>/<prefix>_<minute>.csv` tree.
    pub output_dir: PathBuf,
    pub prefix: String,
    pub retention_hours: u64,

    pub snapshot_enabled: bool,
    /// Minimum time between two completed snapshots.
    pub cooldown_secs: u64,
    /// Absolute, or relative to `output_dir`.
    pub snapshot_dir: PathBuf,
    pub capture_timeout_secs: u64,

    /// Extra trigger keywords, matched case-insensitively against raw lines.
    pub keywords: Vec<String>,

    /// Read `on`/`off`/`toggle`/`status`/`quit` from stdin.
    pub control: bool,

    /// Capture tool executable.
    pub tool: String,
    /// Device serial, exported as `ANDROID_SERIAL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,

    pub sweep_interval_secs: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("logs"),
            prefix: "logcat".to_string(),
            retention_hours: 36,
            snapshot_enabled: true,
            cooldown_secs: 900,
            snapshot_dir: PathBuf::from("snapshots"),
            capture_timeout_secs: 600,
            keywords: Vec::new(),
            control: false,
            tool: "adb".to_string(),
            serial: None,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL.as_secs(),
            pid_file: None,
        }
    }
}

impl CaptureConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn capture_timeout(&self) -> Duration {
        Duration::from_secs(self.capture_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::from_hours(self.retention_hours)
    }

    /// Where snapshot archives are written.
    pub fn snapshot_path(&self) -> PathBuf {
        resolve_snapshot_dir(&self.output_dir, &self.snapshot_dir)
    }
}
