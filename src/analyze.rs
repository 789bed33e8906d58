//! CLI側のコントローラ
//!
//! ファイル選択 → 検証 → 2段階解析 → レポート生成をSessionに沿って進める

use crate::error::{FaceReportError, Result};
use face_report_common::{
    run_pipeline, AnalysisOutcome, AnalysisTransport, ClientConfig, Report, SelectedFile, Session,
};
use std::path::Path;
use tracing::info;

/// 拡張子からMIMEタイプを推定
pub fn media_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// 画像ファイルを選択する
///
/// 型とサイズはファイルを読む前に確認する
pub fn select_path(session: &mut Session, path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(FaceReportError::FileNotFound(path.display().to_string()));
    }

    let media_type = media_type_for(path);
    let size = std::fs::metadata(path)?.len();
    session.check_candidate(&media_type, size)?;

    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());

    session.select_file(SelectedFile::new(name, media_type, bytes))?;
    Ok(())
}

/// 画像を解析してレポートを返す
pub async fn analyze_image<T>(transport: &T, config: &ClientConfig, path: &Path) -> Result<Report>
where
    T: AnalysisTransport,
{
    let mut session = Session::new();
    select_path(&mut session, path)?;

    let ticket = session.begin_analysis().ok_or(FaceReportError::NoImageSelected)?;
    info!(file = %ticket.file.name, base_url = config.base_url(), "analysis started");

    let outcome = run_pipeline(transport, config, &ticket.file).await;
    session.complete(ticket.generation, outcome.clone());
    let AnalysisOutcome { result, summary } = outcome?;
    info!(features = result.features.len(), "analysis finished");

    Ok(Report::build(&result.features, Some(&summary)).with_image_url(result.image_url))
}
