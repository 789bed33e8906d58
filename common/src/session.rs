//! アップロード・解析コントローラの状態
//!
//! 画面状態は常に Idle / Loading / Success / Failed のいずれか1つ。
//! ファイル検証エラーは別枠の通知として持ち、直前の成功結果は消さない。
//! ファイル選択と解析はそれぞれ番号で管理し、最後に始めたものだけが反映される。

use tracing::debug;

use crate::error::{PipelineError, ValidationError};
use crate::pipeline::AnalysisOutcome;
use crate::types::{AnalysisResult, SelectedFile};
use crate::validation::validate_image;

/// 画面状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success {
        result: AnalysisResult,
        summary: String,
    },
    Failed {
        message: String,
    },
}

impl UiState {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Success { .. } => "success",
            UiState::Failed { .. } => "failed",
        }
    }
}

/// analyze() 1回分の引換券
///
/// 完了時に世代番号を照合し、古いパイプラインの結果は捨てる
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub file: SelectedFile,
}

/// コントローラのセッション状態
#[derive(Debug, Clone, Default)]
pub struct Session {
    selected: Option<SelectedFile>,
    notice: Option<ValidationError>,
    state: UiState,
    generation: u64,
    pick: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイル読み込み前の検証（MIMEタイプとサイズのみ）
    ///
    /// 成功時は選択番号を返す。読み込み完了時に `complete_pick` へ渡す。
    /// 検証に通らなくても番号は進むので、それ以前の読み込み結果は捨てられる。
    /// 失敗時は通知をセットし、選択中のファイルは変更しない
    pub fn check_candidate(&mut self, media_type: &str, size: u64) -> Result<u64, ValidationError> {
        self.pick += 1;
        self.validate(media_type, size)?;
        Ok(self.pick)
    }

    /// 読み込みが終わったファイルを反映する
    ///
    /// 最新の選択番号でなければ無視して false を返す。
    /// 読み込み失敗は通知として出す
    pub fn complete_pick(
        &mut self,
        pick: u64,
        read: Result<SelectedFile, ValidationError>,
    ) -> bool {
        if pick != self.pick {
            debug!(pick, current = self.pick, "stale file read ignored");
            return false;
        }

        match read {
            Ok(file) => {
                let _ = self.select_file(file);
            }
            Err(err) => self.notice = Some(err),
        }
        true
    }

    /// ファイルを選択
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), ValidationError> {
        self.validate(&file.media_type, file.size())?;
        debug!(file = %file.name, size = file.size(), "file selected");
        self.selected = Some(file);
        self.notice = None;
        Ok(())
    }

    fn validate(&mut self, media_type: &str, size: u64) -> Result<(), ValidationError> {
        validate_image(media_type, size).inspect_err(|err| {
            self.notice = Some(err.clone());
        })
    }

    /// 解析開始
    ///
    /// ファイル未選択なら何もしない。再実行時は古い結果とエラーを消す
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        let file = self.selected.clone()?;
        self.generation += 1;
        self.notice = None;
        self.state = UiState::Loading;
        debug!(generation = self.generation, "analysis started");
        Some(AnalysisTicket {
            generation: self.generation,
            file,
        })
    }

    /// 解析完了
    ///
    /// 最新の引換券でなければ無視して false を返す
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<AnalysisOutcome, PipelineError>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "stale analysis ignored");
            return false;
        }

        self.state = match outcome {
            Ok(AnalysisOutcome { result, summary }) => UiState::Success { result, summary },
            Err(err) => UiState::Failed {
                message: err.user_message(),
            },
        };
        true
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.selected.is_some()
    }

    pub fn preview(&self) -> Option<&str> {
        self.selected.as_ref().map(SelectedFile::preview_data_url)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading)
    }

    pub fn notice(&self) -> Option<&ValidationError> {
        self.notice.as_ref()
    }

    /// 表示するエラー（検証通知を優先）
    pub fn error_message(&self) -> Option<String> {
        if let Some(notice) = &self.notice {
            return Some(notice.to_string());
        }
        match &self.state {
            UiState::Failed { message } => Some(message.clone()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            UiState::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match &self.state {
            UiState::Success { summary, .. } => Some(summary.as_str()),
            _ => None,
        }
    }
}
