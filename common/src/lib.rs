//! Face Report Common Library
//!
//! CLIとWeb(WASM)で共有される型・コントローラ状態・解析パイプライン

pub mod types;
pub mod error;
pub mod validation;
pub mod config;
pub mod parser;
pub mod pipeline;
pub mod session;
pub mod report;

pub use types::{describe, AnalysisResult, Feature, FeatureScoreSet, SelectedFile};
pub use error::{ConfigError, PipelineError, Step, TransportError, ValidationError};
pub use validation::{validate_image, MAX_UPLOAD_BYTES};
pub use config::ClientConfig;
pub use pipeline::{run_pipeline, AnalysisOutcome, AnalysisTransport, HttpReply, UPLOAD_FIELD};
pub use session::{AnalysisTicket, Session, UiState};
pub use report::{color_class, Band, FeatureRow, Report};
