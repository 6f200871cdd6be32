use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("capture tool '{program}' not found; install it and make sure it is on PATH")]
    ToolMissing { program: String },

    #[error("failed to start capture tool '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("capture tool stdout is not available")]
    NoStdout,
}

impl SourceError {
    pub fn spawn(program: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::ToolMissing {
                program: program.to_string(),
            }
        } else {
            Self::Spawn {
                program: program.to_string(),
                source,
            }
        }
    }
}
