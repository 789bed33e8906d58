//! エラー型定義
//!
//! - ValidationError: ファイル選択時のローカル検証エラー（ネットワークに到達しない）
//! - TransportError: HTTP送受信レベルの失敗
//! - PipelineError: 解析パイプライン（upload → summary）の失敗
//! - ConfigError: 接続設定の不備

use thiserror::Error;

/// 画面に出す汎用エラーメッセージ
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed. Please try again.";

/// ファイル検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload an image file (JPEG, PNG, etc.).")]
    NotAnImage { media_type: String },

    #[error("File size must be less than 4MB.")]
    TooLarge { size: u64, limit: u64 },

    /// 選択したファイルの読み込みに失敗
    #[error("Could not read the selected file.")]
    Unreadable { name: String, reason: String },
}

/// 通信エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,
}

/// パイプラインのステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Summary,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Upload => "upload",
            Step::Summary => "summary",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析パイプラインのエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// 200以外のステータス
    #[error("{step} rejected with status {status}")]
    Rejected {
        step: Step,
        status: u16,
        server_message: Option<String>,
    },

    /// featuresかimgPathが欠けている
    #[error("Invalid response format from server")]
    InvalidUploadResponse,

    /// summaryが欠けているか空
    #[error("Failed to generate summary")]
    MissingSummary,

    #[error("{step} failed: {source}")]
    Transport {
        step: Step,
        #[source]
        source: TransportError,
    },
}

impl PipelineError {
    pub fn step(&self) -> Step {
        match self {
            PipelineError::Rejected { step, .. } | PipelineError::Transport { step, .. } => *step,
            PipelineError::InvalidUploadResponse => Step::Upload,
            PipelineError::MissingSummary => Step::Summary,
        }
    }

    /// 画面表示用のメッセージ
    ///
    /// サーバーが返したエラー文言を優先し、なければ汎用メッセージにする
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Rejected { server_message: Some(message), .. } => message.clone(),
            PipelineError::Rejected { server_message: None, .. } => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            PipelineError::InvalidUploadResponse | PipelineError::MissingSummary => self.to_string(),
            PipelineError::Transport { source: TransportError::Timeout, .. } => {
                "The analysis service did not respond in time.".to_string()
            }
            PipelineError::Transport { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// 接続設定エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    EmptyBaseUrl,

    #[error("API base URL must start with http:// or https://: {0}")]
    UnsupportedScheme(String),
}
