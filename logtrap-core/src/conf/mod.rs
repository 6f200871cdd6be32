//! Capture configuration: defaults, the optional HCL file, and validation.

mod error;
mod loader;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::load_config;
pub use types::CaptureConfig;
pub use validate::{resolve_snapshot_dir, split_keywords, validate};
