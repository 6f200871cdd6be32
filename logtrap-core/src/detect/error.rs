use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("unparsable status code '{value}'")]
    StatusCode { value: String },
}
