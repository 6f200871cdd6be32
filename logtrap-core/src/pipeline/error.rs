use crate::conf::ConfigError;
use crate::rotate::RotateError;
use crate::source::SourceError;
use thiserror::Error;

/// Conditions that stop the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rotate(#[from] RotateError),

    #[error(transparent)]
    Source(#[from] SourceError),
}
