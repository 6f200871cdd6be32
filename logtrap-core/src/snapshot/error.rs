use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to prepare snapshot file {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start capture tool {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("capture tool failed while running: {0}")]
    Wait(#[source] std::io::Error),

    #[error("capture tool exited with {0}")]
    Exit(ExitStatus),

    #[error("capture did not finish within {}s", .0.as_secs())]
    Timeout(Duration),
}
