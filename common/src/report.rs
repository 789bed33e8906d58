//! 解析レポートの表示モデル
//!
//! (スコア, 要約) から表示用データを組み立てる純粋関数。
//! WASMのコンポーネントとCLIのテキスト出力が共通で使う。

use serde::Serialize;

use crate::types::{describe, FeatureScoreSet};

/// スコアが数値でない場合の表示
pub const MISSING_SCORE: &str = "N/A";
/// 要約がない場合の表示
pub const MISSING_SUMMARY: &str = "No summary available.";

/// スコア帯（色分け用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    /// <4: low, 4〜7未満: mid, 7以上: high
    pub fn from_score(score: f64) -> Band {
        if score < 4.0 {
            Band::Low
        } else if score < 7.0 {
            Band::Mid
        } else {
            Band::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Band::Low => "bg-red-400",
            Band::Mid => "bg-yellow-400",
            Band::High => "bg-green-400",
        }
    }
}

/// スコアに対応する色クラス
pub fn color_class(score: f64) -> &'static str {
    Band::from_score(score).css_class()
}

/// 1特徴分の表示行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRow {
    pub label: String,
    pub description: &'static str,
    pub score: Option<f64>,
    /// "8/10" または "N/A"
    pub score_text: String,
    /// バーの塗り率 (0〜100)
    pub fill_percent: f64,
    pub band: Option<Band>,
}

impl FeatureRow {
    fn new(label: &str, score: Option<f64>) -> Self {
        let score_text = match score {
            Some(s) => format!("{}/10", s),
            None => MISSING_SCORE.to_string(),
        };
        Self {
            label: label.to_string(),
            description: describe(label),
            score,
            score_text,
            fill_percent: score.map(|s| (s * 10.0).clamp(0.0, 100.0)).unwrap_or(0.0),
            band: score.map(Band::from_score),
        }
    }

    /// CSS幅 ("80%")
    pub fn width_style(&self) -> String {
        format!("width: {}%", self.fill_percent)
    }

    pub fn bar_class(&self) -> &'static str {
        self.band.map(|b| b.css_class()).unwrap_or("bg-gray-300")
    }
}

/// 解析レポート
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// 総合スコア（小数1桁）
    pub overall: String,
    pub rows: Vec<FeatureRow>,
    pub summary: String,
    pub image_url: Option<String>,
}

impl Report {
    pub fn build(features: &FeatureScoreSet, summary: Option<&str>) -> Self {
        let rows = features
            .iter()
            .map(|(label, score)| FeatureRow::new(label, score))
            .collect();

        let summary = summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(MISSING_SUMMARY)
            .to_string();

        Self {
            overall: format_one_decimal(features.average()),
            rows,
            summary,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// ターミナル向けテキスト
    pub fn render_text(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        out.push_str(&format!("Overall Score: {}\n", self.overall));
        if let Some(url) = &self.image_url {
            out.push_str(&format!("Image: {}\n", url));
        }
        out.push('\n');

        for row in &self.rows {
            let cells = (row.fill_percent / 10.0).round() as usize;
            let bar = format!("{}{}", "#".repeat(cells), "-".repeat(10 - cells.min(10)));
            let band = row.band.map(|b| b.as_str()).unwrap_or("-");
            out.push_str(&format!(
                "{:<width$}  {:>7}  [{}]  {}\n",
                row.label,
                row.score_text,
                bar,
                band,
                width = width
            ));
            out.push_str(&format!("{:<width$}  {}\n", "", row.description, width = width));
        }

        out.push_str("\nAI Analysis Summary\n");
        out.push_str(&self.summary);
        out.push('\n');
        out
    }
}

/// 小数1桁の文字列にする
///
/// 値がちょうど中間（例: 7.25）のときは0から遠い方へ丸める。
/// `{:.1}` は偶数側へ丸めるため、中間かどうかを正確な10進展開で判定する
fn format_one_decimal(value: f64) -> String {
    let exact = format!("{:.60}", value.abs());
    let is_tie = exact
        .split_once('.')
        .and_then(|(_, frac)| frac.get(1..))
        .map(|rest| rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0'))
        .unwrap_or(false);

    if is_tie {
        // 中間値なら10倍は正確に表現できる
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MISSING_DESCRIPTION;

    fn scores(pairs: &[(&str, f64)]) -> FeatureScoreSet {
        let mut set = FeatureScoreSet::new();
        for (name, score) in pairs {
            set.insert(*name, *score);
        }
        set
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::from_score(3.9), Band::Low);
        assert_eq!(Band::from_score(4.0), Band::Mid);
        assert_eq!(Band::from_score(6.9), Band::Mid);
        assert_eq!(Band::from_score(7.0), Band::High);
        assert_eq!(color_class(0.0), "bg-red-400");
        assert_eq!(color_class(5.5), "bg-yellow-400");
        assert_eq!(color_class(10.0), "bg-green-400");
    }

    #[test]
    fn test_overall_average_one_decimal() {
        let report = Report::build(&scores(&[("Symmetry", 8.0), ("Jawline", 7.5), ("Under-Eye", 6.0)]), None);
        // (8 + 7.5 + 6) / 3 = 7.1666...
        assert_eq!(report.overall, "7.2");
    }

    #[test]
    fn test_overall_half_rounds_up() {
        // (7 + 7.5) / 2 = 7.25
        let report = Report::build(&scores(&[("Symmetry", 7.0), ("Jawline", 7.5)]), None);
        assert_eq!(report.overall, "7.3");

        let report = Report::build(
            &scores(&[("Symmetry", 8.0), ("Jawline", 8.5), ("Under-Eye", 8.0), ("Buccal Fat", 8.5)]),
            None,
        );
        assert_eq!(report.overall, "8.3");

        let report = Report::build(&scores(&[("Symmetry", 6.5), ("Jawline", 6.0)]), None);
        assert_eq!(report.overall, "6.3");
    }

    #[test]
    fn test_overall_near_half_is_not_a_tie() {
        // 1.5 / 10 は 0.1499999... なので切り下げ
        let mut set = scores(&[("Symmetry", 1.5)]);
        for i in 0..9 {
            set.insert(format!("Extra {}", i), 0.0);
        }
        assert_eq!(Report::build(&set, None).overall, "0.1");
    }

    #[test]
    fn test_overall_empty_is_zero() {
        let report = Report::build(&FeatureScoreSet::new(), Some("x"));
        assert_eq!(report.overall, "0.0");
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let report = Report::build(
            &scores(&[("Symmetry", 8.0), ("Jawline", 6.0)]),
            Some("Balanced features."),
        );

        assert_eq!(report.overall, "7.0");
        assert_eq!(report.rows.len(), 2);

        assert_eq!(report.rows[0].label, "Symmetry");
        assert_eq!(report.rows[0].fill_percent, 80.0);
        assert_eq!(report.rows[0].band, Some(Band::High));
        assert_eq!(report.rows[0].score_text, "8/10");

        assert_eq!(report.rows[1].label, "Jawline");
        assert_eq!(report.rows[1].fill_percent, 60.0);
        assert_eq!(report.rows[1].band, Some(Band::Mid));
        assert_eq!(report.rows[1].width_style(), "width: 60%");

        assert_eq!(report.summary, "Balanced features.");
    }

    #[test]
    fn test_row_placeholders() {
        let mut set = FeatureScoreSet::new();
        set.insert_raw("Ear Shape", serde_json::json!("tall"));
        let report = Report::build(&set, None);

        let row = &report.rows[0];
        assert_eq!(row.description, MISSING_DESCRIPTION);
        assert_eq!(row.score_text, MISSING_SCORE);
        assert_eq!(row.fill_percent, 0.0);
        assert_eq!(row.band, None);
        assert_eq!(report.summary, MISSING_SUMMARY);
    }

    #[test]
    fn test_fill_is_clamped() {
        let report = Report::build(&scores(&[("Symmetry", 12.0), ("Jawline", -1.0)]), None);
        assert_eq!(report.rows[0].fill_percent, 100.0);
        assert_eq!(report.rows[1].fill_percent, 0.0);
    }

    #[test]
    fn test_score_text_keeps_decimals() {
        let report = Report::build(&scores(&[("Buccal Fat", 7.5)]), None);
        assert_eq!(report.rows[0].score_text, "7.5/10");
    }

    #[test]
    fn test_render_text() {
        let report = Report::build(
            &scores(&[("Symmetry", 8.0), ("Jawline", 6.0)]),
            Some("Line one.\nLine two."),
        )
        .with_image_url("http://api.test/img/1.png");

        let text = report.render_text();
        assert!(text.starts_with("Overall Score: 7.0\n"));
        assert!(text.contains("Image: http://api.test/img/1.png"));
        assert!(text.contains("[########--]  high"));
        assert!(text.contains("[######----]  mid"));
        assert!(text.contains("Measures facial symmetry"));
        assert!(text.ends_with("Line one.\nLine two.\n"));
    }
}
