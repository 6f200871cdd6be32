use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    #[error("retention_hours must be a positive number of hours")]
    ZeroRetention,

    #[error("sweep_interval_secs must be greater than zero")]
    ZeroSweepInterval,

    #[error("invalid file prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Operator-facing advice for errors that have an obvious fix.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ZeroRetention => Some(
                "Set a retention of at least one hour.\n\
                 \n\
                 Example:\n\
                 \n\
                 retention_hours = 36",
            ),
            Self::InvalidPrefix { .. } => Some(
                "The prefix becomes part of every file name and must not contain\n\
                 path separators.\n\
                 \n\
                 Example:\n\
                 \n\
                 prefix = \"logcat\"",
            ),
            Self::Parse { .. } => Some(
                "Config files use HCL attributes, one per line.\n\
                 \n\
                 Run `logtrap config init` to write a commented template.",
            ),
            _ => None,
        }
    }
}
