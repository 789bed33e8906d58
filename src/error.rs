use face_report_common::{ConfigError, PipelineError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaceReportError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid service settings: {0}")]
    ClientConfig(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No image selected")]
    NoImageSelected,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{}", .0.user_message())]
    Pipeline(#[from] PipelineError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FaceReportError>;
