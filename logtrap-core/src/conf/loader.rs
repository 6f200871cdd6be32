use crate::conf::{CaptureConfig, ConfigError, split_keywords};
use std::fs;
use std::path::Path;

/// Read an HCL config file. Attributes that are absent keep their defaults.
///
/// The result is not validated; callers apply command-line overrides first and
/// then call [`crate::conf::validate`].
pub fn load_config(path: &Path) -> Result<CaptureConfig, ConfigError> {
    let src = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let mut cfg: CaptureConfig = hcl::from_str(&src).map_err(|e| ConfigError::parse(path, e))?;
    cfg.keywords = split_keywords(&cfg.keywords);

    tracing::debug!(path = %path.display(), "config file loaded");

    Ok(cfg)
}
