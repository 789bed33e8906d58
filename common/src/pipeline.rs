//! 2段階解析パイプライン
//!
//! Step1: 画像アップロード → 特徴スコア (POST /api/upload)
//! Step2: スコア → 要約文 (POST /api/generate-summary)
//!
//! 送受信は `AnalysisTransport` に委譲する（WASMはfetch、CLIはreqwest）

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{PipelineError, Step, TransportError};
use crate::parser::{extract_error_message, parse_summary_response, parse_upload_response};
use crate::types::{AnalysisResult, FeatureScoreSet, SelectedFile};

/// multipartのフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// HTTPレスポンス（ステータスと本文のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// 解析サービスへの送受信
///
/// タイムアウトは実装側の責務。ステータスの解釈はパイプラインが行う
#[allow(async_fn_in_trait)]
pub trait AnalysisTransport {
    /// `file` をmultipartの `file` フィールドとしてPOST
    async fn post_file(&self, url: &str, file: &SelectedFile) -> Result<HttpReply, TransportError>;

    /// JSON本文をPOST
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpReply, TransportError>;
}

/// パイプラインの成功結果
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub summary: String,
}

#[derive(Serialize)]
struct SummaryRequest<'a> {
    scores: &'a FeatureScoreSet,
}

/// 解析を実行
///
/// どちらかのステップが失敗した時点で中断し、部分結果は返さない
pub async fn run_pipeline<T>(
    transport: &T,
    config: &ClientConfig,
    file: &SelectedFile,
) -> Result<AnalysisOutcome, PipelineError>
where
    T: AnalysisTransport + ?Sized,
{
    // Step1: アップロード・解析
    debug!(file = %file.name, size = file.size(), "uploading image");
    let reply = transport
        .post_file(&config.upload_url(), file)
        .await
        .map_err(|source| transport_failure(Step::Upload, source))?;
    ensure_ok(Step::Upload, &reply)?;
    let result = parse_upload_response(&reply.body, config).inspect_err(|_| {
        warn!(step = "upload", "response is missing features or imgPath");
    })?;
    debug!(features = result.features.len(), image_url = %result.image_url, "upload analyzed");

    // Step2: 要約生成
    let request = serde_json::to_value(SummaryRequest {
        scores: &result.features,
    })
    .map_err(|_| PipelineError::MissingSummary)?;
    let reply = transport
        .post_json(&config.summary_url(), &request)
        .await
        .map_err(|source| transport_failure(Step::Summary, source))?;
    ensure_ok(Step::Summary, &reply)?;
    let summary = parse_summary_response(&reply.body).inspect_err(|_| {
        warn!(step = "summary", "response has no summary text");
    })?;
    debug!(chars = summary.len(), "summary generated");

    Ok(AnalysisOutcome { result, summary })
}

fn transport_failure(step: Step, source: TransportError) -> PipelineError {
    warn!(step = step.as_str(), error = %source, "transport failure");
    PipelineError::Transport { step, source }
}

/// 200のみ成功扱い
fn ensure_ok(step: Step, reply: &HttpReply) -> Result<(), PipelineError> {
    if reply.status == 200 {
        return Ok(());
    }
    warn!(step = step.as_str(), status = reply.status, "service rejected request");
    Err(PipelineError::Rejected {
        step,
        status: reply.status,
        server_message: extract_error_message(&reply.body),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// 用意したレスポンスを順に返すテスト用トランスポート
    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
        pub(crate) calls: RefCell<Vec<(String, Option<serde_json::Value>)>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(replies: Vec<Result<HttpReply, TransportError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn next(&self) -> Result<HttpReply, TransportError> {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
        }
    }

    impl AnalysisTransport for ScriptedTransport {
        async fn post_file(&self, url: &str, _file: &SelectedFile) -> Result<HttpReply, TransportError> {
            self.calls.borrow_mut().push((url.to_string(), None));
            self.next()
        }

        async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpReply, TransportError> {
            self.calls.borrow_mut().push((url.to_string(), Some(body.clone())));
            self.next()
        }
    }

    pub(crate) fn sample_file() -> SelectedFile {
        SelectedFile::new("face.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn config() -> ClientConfig {
        ClientConfig::new("http://api.test").expect("設定エラー")
    }

    const UPLOAD_OK: &str = r#"{"features": {"Symmetry": 8, "Jawline": 6}, "imgPath": "/img/1.png"}"#;

    #[test]
    fn test_pipeline_success() {
        let transport = ScriptedTransport::new(vec![
            Ok(HttpReply::new(200, UPLOAD_OK)),
            Ok(HttpReply::new(200, r#"{"summary": "Balanced features."}"#)),
        ]);

        let outcome = block_on(run_pipeline(&transport, &config(), &sample_file()))
            .expect("パイプライン失敗");

        assert_eq!(outcome.summary, "Balanced features.");
        assert_eq!(outcome.result.image_url, "http://api.test/img/1.png");

        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "http://api.test/api/upload");
        assert_eq!(calls[1].0, "http://api.test/api/generate-summary");
        assert_eq!(
            calls[1].1,
            Some(serde_json::json!({"scores": {"Symmetry": 8, "Jawline": 6}}))
        );
    }

    #[test]
    fn test_upload_missing_img_path_skips_summary() {
        let transport = ScriptedTransport::new(vec![Ok(HttpReply::new(
            200,
            r#"{"features": {"Symmetry": 8}}"#,
        ))]);

        let err = block_on(run_pipeline(&transport, &config(), &sample_file())).unwrap_err();

        assert_eq!(err, PipelineError::InvalidUploadResponse);
        assert_eq!(transport.calls.borrow().len(), 1);
    }

    #[test]
    fn test_upload_rejected_uses_server_message() {
        let transport = ScriptedTransport::new(vec![Ok(HttpReply::new(
            500,
            r#"{"error": "Face analysis failed"}"#,
        ))]);

        let err = block_on(run_pipeline(&transport, &config(), &sample_file())).unwrap_err();

        assert_eq!(err.step(), Step::Upload);
        assert_eq!(err.user_message(), "Face analysis failed");
        assert_eq!(transport.calls.borrow().len(), 1);
    }

    #[test]
    fn test_non_200_success_status_is_failure() {
        // 201なども成功扱いしない
        let transport = ScriptedTransport::new(vec![Ok(HttpReply::new(201, UPLOAD_OK))]);
        let err = block_on(run_pipeline(&transport, &config(), &sample_file())).unwrap_err();
        assert!(matches!(err, PipelineError::Rejected { status: 201, .. }));
    }

    #[test]
    fn test_summary_500_fails_whole_pipeline() {
        let transport = ScriptedTransport::new(vec![
            Ok(HttpReply::new(200, UPLOAD_OK)),
            Ok(HttpReply::new(500, "Internal Server Error")),
        ]);

        let err = block_on(run_pipeline(&transport, &config(), &sample_file())).unwrap_err();

        assert_eq!(
            err,
            PipelineError::Rejected {
                step: Step::Summary,
                status: 500,
                server_message: None,
            }
        );
    }

    #[test]
    fn test_summary_missing_text() {
        let transport = ScriptedTransport::new(vec![
            Ok(HttpReply::new(200, UPLOAD_OK)),
            Ok(HttpReply::new(200, r#"{"summary": ""}"#)),
        ]);

        let err = block_on(run_pipeline(&transport, &config(), &sample_file())).unwrap_err();
        assert_eq!(err, PipelineError::MissingSummary);
    }

    #[test]
    fn test_transport_timeout() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Timeout)]);

        let err = block_on(run_pipeline(&transport, &config(), &sample_file())).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Transport {
                step: Step::Upload,
                source: TransportError::Timeout,
            }
        );
    }
}
