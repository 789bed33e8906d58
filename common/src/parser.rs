//! 解析サービスのレスポンスパーサー
//!
//! - upload: `{ "features": {...}, "imgPath": "/..." }`
//! - generate-summary: `{ "summary": "..." }`
//! - エラー時: `{ "error": "..." }`

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::PipelineError;
use crate::types::{AnalysisResult, FeatureScoreSet};

/// uploadレスポンスをパース
///
/// featuresがオブジェクトでない、またはimgPathが空の場合は失敗（部分結果にしない）
pub fn parse_upload_response(body: &str, config: &ClientConfig) -> Result<AnalysisResult, PipelineError> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| PipelineError::InvalidUploadResponse)?;

    let features = value
        .get("features")
        .and_then(Value::as_object)
        .cloned()
        .ok_or(PipelineError::InvalidUploadResponse)?;

    let img_path = value
        .get("imgPath")
        .and_then(Value::as_str)
        .filter(|path| !path.trim().is_empty())
        .ok_or(PipelineError::InvalidUploadResponse)?;

    Ok(AnalysisResult {
        features: FeatureScoreSet::from_map(features),
        image_url: config.absolute_url(img_path),
    })
}

/// generate-summaryレスポンスをパース
pub fn parse_summary_response(body: &str) -> Result<String, PipelineError> {
    let value: Value = serde_json::from_str(body).map_err(|_| PipelineError::MissingSummary)?;

    value
        .get("summary")
        .and_then(Value::as_str)
        .filter(|summary| !summary.trim().is_empty())
        .map(str::to_string)
        .ok_or(PipelineError::MissingSummary)
}

/// エラーレスポンスから `error` 文字列を取り出す
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
