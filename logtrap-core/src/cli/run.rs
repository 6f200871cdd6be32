use crate::conf::{CaptureConfig, ConfigError, load_config, split_keywords, validate};
use crate::logging::{LogMode, default_log_mode};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Capture options. Anything left unset falls back to the config file, then
/// to built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// HCL config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Output directory (default: logs)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// File prefix (default: logcat)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Retention hours for logs and snapshots (default: 36)
    #[arg(long)]
    pub retention: Option<u64>,

    /// Disable automatic snapshots
    #[arg(long, alias = "no-bugreport")]
    pub no_snapshot: bool,

    /// Cooldown seconds between snapshots (default: 900)
    #[arg(long, alias = "bugreport-cooldown")]
    pub cooldown: Option<u64>,

    /// Snapshot directory, absolute or relative to the output directory
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,

    /// Extra trigger keyword; repeatable, each value may hold several
    /// separated by `,` or `;`
    #[arg(long = "keyword", short = 'k')]
    pub keywords: Vec<String>,

    /// Read on/off/toggle/status/quit commands from stdin
    #[arg(long)]
    pub control: bool,

    /// Capture tool executable (default: adb)
    #[arg(long)]
    pub tool: Option<String>,

    /// Device serial, passed to the tool as ANDROID_SERIAL
    #[arg(long, short = 's')]
    pub serial: Option<String>,

    /// Seconds before a snapshot capture is abandoned (default: 600)
    #[arg(long)]
    pub capture_timeout: Option<u64>,

    /// Seconds between retention sweeps (default: 300)
    #[arg(long)]
    pub sweep_interval: Option<u64>,

    #[arg(long)]
    pub pid_file: Option<PathBuf>,

    /// Diagnostics format on stderr (default: pretty on a terminal)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl RunArgs {
    pub fn log_mode(&self) -> LogMode {
        match self.log_format {
            Some(LogFormat::Json) => LogMode::Json,
            Some(LogFormat::Pretty) => LogMode::Pretty,
            None => default_log_mode(),
        }
    }

    /// Merge defaults, the config file and these flags, then validate.
    pub fn resolve(&self) -> Result<CaptureConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => CaptureConfig::default(),
        };

        if let Some(dir) = &self.dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            cfg.prefix = prefix.clone();
        }
        if let Some(hours) = self.retention {
            cfg.retention_hours = hours;
        }
        if self.no_snapshot {
            cfg.snapshot_enabled = false;
        }
        if let Some(secs) = self.cooldown {
            cfg.cooldown_secs = secs;
        }
        if let Some(dir) = &self.snapshot_dir {
            cfg.snapshot_dir = dir.clone();
        }
        cfg.keywords.extend(split_keywords(&self.keywords));
        if self.control {
            cfg.control = true;
        }
        if let Some(tool) = &self.tool {
            cfg.tool = tool.clone();
        }
        if let Some(serial) = &self.serial {
            cfg.serial = Some(serial.clone());
        }
        if let Some(secs) = self.capture_timeout {
            cfg.capture_timeout_secs = secs;
        }
        if let Some(secs) = self.sweep_interval {
            cfg.sweep_interval_secs = secs;
        }
        if let Some(path) = &self.pid_file {
            cfg.pid_file = Some(path.clone());
        }

        validate(&cfg)?;
        Ok(cfg)
    }
}
