use crate::conf::{CaptureConfig, ConfigError};
use std::path::{Path, PathBuf};

pub fn validate(cfg: &CaptureConfig) -> Result<(), ConfigError> {
    if cfg.retention_hours == 0 {
        return Err(ConfigError::ZeroRetention);
    }

    if cfg.sweep_interval_secs == 0 {
        return Err(ConfigError::ZeroSweepInterval);
    }

    let prefix = cfg.prefix.trim();
    if prefix.is_empty() {
        return Err(ConfigError::InvalidPrefix {
            prefix: cfg.prefix.clone(),
            reason: "prefix must not be empty",
        });
    }
    if prefix.contains(['/', '\\']) || prefix == "." || prefix == ".." {
        return Err(ConfigError::InvalidPrefix {
            prefix: cfg.prefix.clone(),
            reason: "prefix must not contain path separators",
        });
    }

    Ok(())
}

/// Flatten keyword arguments. Each value may hold several tokens separated by
/// `,`, `;` or newlines; blanks are dropped.
pub fn split_keywords<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split([',', ';', '\n']))
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn resolve_snapshot_dir(output_dir: &Path, snapshot_dir: &Path) -> PathBuf {
    if snapshot_dir.is_absolute() {
        snapshot_dir.to_path_buf()
    } else {
        output_dir.join(snapshot_dir)
    }
}
