//! メインアプリケーションコンポーネント
//!
//! アップロード・解析コントローラ。状態はすべて `Session` が持ち、
//! ここではブラウザのイベントと非同期処理をつなぐだけ

use face_report_common::{
    run_pipeline, ClientConfig, Report, SelectedFile, Session, UiState, ValidationError,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;
use web_sys::File;

use crate::api::fetch::FetchTransport;
use crate::components::{
    analyze_button::AnalyzeButton,
    error_banner::ErrorBanner,
    header::Header,
    loading_indicator::LoadingIndicator,
    report_view::ReportView,
    upload_area::UploadArea,
};

/// 成功状態ならレポートを組み立てる
pub fn report_for(session: &Session) -> Option<Report> {
    match session.state() {
        UiState::Success { result, summary } => Some(
            Report::build(&result.features, Some(summary)).with_image_url(result.image_url.clone()),
        ),
        _ => None,
    }
}

fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let session = RwSignal::new(Session::new());

    let preview = Signal::derive(move || session.with(|s| s.preview().map(str::to_string)));
    let has_file = Signal::derive(move || session.with(Session::has_file));
    let is_loading = Signal::derive(move || session.with(Session::is_loading));
    let error_message = Signal::derive(move || session.with(Session::error_message));
    let is_notice = Signal::derive(move || session.with(|s| s.notice().is_some()));
    let report = Memo::new(move |_| session.with(report_for));

    // ファイル選択ハンドラ
    let on_file_chosen = move |file: File| {
        let media_type = file.type_();
        let size = file.size() as u64;

        // 読み込む前に型とサイズを確認
        let Some(pick) = session
            .try_update(|s| s.check_candidate(&media_type, size).ok())
            .flatten()
        else {
            return;
        };

        let name = file.name();
        spawn_local(async move {
            let file = gloo::file::File::from(file);
            let read = match gloo::file::futures::read_as_bytes(&file).await {
                Ok(bytes) => Ok(SelectedFile::new(name, media_type, bytes)),
                Err(err) => {
                    log_error(&format!("failed to read {}: {}", name, err));
                    Err(ValidationError::Unreadable {
                        name,
                        reason: err.to_string(),
                    })
                }
            };
            session.update(|s| {
                s.complete_pick(pick, read);
            });
        });
    };

    // 解析開始ハンドラ
    let on_analyze = move |_: ()| {
        let Some(ticket) = session.try_update(Session::begin_analysis).flatten() else {
            return;
        };

        let config = config.clone();
        spawn_local(async move {
            let transport = FetchTransport::new(config.timeout);
            let outcome = run_pipeline(&transport, &config, &ticket.file).await;
            if let Err(err) = &outcome {
                log_error(&format!("analysis failed: {}", err));
            }
            session.update(|s| {
                s.complete(ticket.generation, outcome);
            });
        });
    };

    let on_dismiss = move |_: ()| session.update(Session::dismiss_notice);

    view! {
        <div class="container">
            <div class="card">
                <Header />

                <ErrorBanner
                    message=error_message
                    dismissable=is_notice
                    on_dismiss=on_dismiss
                />

                <UploadArea preview=preview on_file_chosen=on_file_chosen />

                <div class="actions">
                    <AnalyzeButton
                        visible=has_file
                        is_loading=is_loading
                        on_analyze=on_analyze
                    />
                </div>

                <Show when=move || is_loading.get()>
                    <LoadingIndicator />
                </Show>

                {move || report.get().map(|report| view! { <ReportView report=report /> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_report_common::{AnalysisOutcome, AnalysisResult, FeatureScoreSet, PipelineError, Step};

    fn selected_session() -> Session {
        let mut session = Session::new();
        session
            .select_file(SelectedFile::new("face.png", "image/png", vec![1, 2, 3]))
            .expect("選択失敗");
        session
    }

    #[test]
    fn test_report_only_on_success() {
        let mut session = selected_session();
        assert!(report_for(&session).is_none());

        let ticket = session.begin_analysis().expect("引換券なし");
        assert!(report_for(&session).is_none());

        let mut features = FeatureScoreSet::new();
        features.insert("Symmetry", 8.0);
        features.insert("Jawline", 6.0);
        session.complete(
            ticket.generation,
            Ok(AnalysisOutcome {
                result: AnalysisResult {
                    features,
                    image_url: "http://localhost:5000/img/1.png".to_string(),
                },
                summary: "Balanced features.".to_string(),
            }),
        );

        let report = report_for(&session).expect("レポートなし");
        assert_eq!(report.overall, "7.0");
        assert_eq!(report.image_url.as_deref(), Some("http://localhost:5000/img/1.png"));
    }

    #[test]
    fn test_no_report_after_failure() {
        let mut session = selected_session();
        let ticket = session.begin_analysis().expect("引換券なし");
        session.complete(
            ticket.generation,
            Err(PipelineError::Rejected {
                step: Step::Summary,
                status: 500,
                server_message: None,
            }),
        );

        assert!(report_for(&session).is_none());
        assert!(session.error_message().is_some());
    }
}
