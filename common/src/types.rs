//! 解析データの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Feature: 既知の顔特徴（ラベルと説明）
//! - FeatureScoreSet: 特徴名 → スコア(0〜10) の順序付きマップ
//! - AnalysisResult: スコア + 画像URL（uploadの出力）
//! - SelectedFile: ユーザーが選択した画像

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 説明が見つからない場合の表示
pub const MISSING_DESCRIPTION: &str = "No description available.";

/// 既知の顔特徴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Symmetry,
    CanthalTilt,
    GoldenRatio,
    BuccalFat,
    Jawline,
    SkinClarity,
    UnderEye,
    PhiltrumRatio,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Symmetry,
        Feature::CanthalTilt,
        Feature::GoldenRatio,
        Feature::BuccalFat,
        Feature::Jawline,
        Feature::SkinClarity,
        Feature::UnderEye,
        Feature::PhiltrumRatio,
    ];

    /// サーバーが返すラベル
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Symmetry => "Symmetry",
            Feature::CanthalTilt => "Canthal Tilt",
            Feature::GoldenRatio => "Golden Ratio",
            Feature::BuccalFat => "Buccal Fat",
            Feature::Jawline => "Jawline",
            Feature::SkinClarity => "Skin Clarity",
            Feature::UnderEye => "Under-Eye",
            Feature::PhiltrumRatio => "Philtrum Ratio",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::Symmetry => "Measures facial symmetry between left and right sides",
            Feature::CanthalTilt => "Angle of eye corners affecting youthful appearance",
            Feature::GoldenRatio => "Proximity to ideal 1.618:1 facial proportions",
            Feature::BuccalFat => "Cheek fat volume affecting facial contour",
            Feature::Jawline => "Definition and angularity of jaw structure",
            Feature::SkinClarity => "Evenness and smoothness of skin texture",
            Feature::UnderEye => "Dark circles or puffiness under eyes",
            Feature::PhiltrumRatio => "Proportion between nose and upper lip",
        }
    }

    pub fn from_label(label: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// ラベルから説明を引く（未知のラベルはプレースホルダ）
pub fn describe(label: &str) -> &'static str {
    Feature::from_label(label)
        .map(|f| f.description())
        .unwrap_or(MISSING_DESCRIPTION)
}

/// 特徴スコアの集合
///
/// サーバーが返したJSONオブジェクトの順序をそのまま保持する。
/// 値は生のJSONで持ち、数値でないものは表示側でプレースホルダにする。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureScoreSet(Map<String, Value>);

impl FeatureScoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn insert(&mut self, name: impl Into<String>, score: f64) {
        self.0.insert(name.into(), Value::from(score));
    }

    pub fn insert_raw(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// (名前, スコア) を受信順に返す。数値でない値はNone
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_f64().filter(|v| v.is_finite())))
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(Value::as_f64)
    }

    /// 数値スコアの算術平均。数値が1つもなければ0.0
    pub fn average(&self) -> f64 {
        let scores: Vec<f64> = self.iter().filter_map(|(_, score)| score).collect();
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// upload成功時の解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub features: FeatureScoreSet,
    /// 絶対URLに書き換え済みの画像パス
    pub image_url: String,
}

/// ユーザーが選択した画像
///
/// 生データとプレビュー用Data URLを持つ。選び直したら丸ごと置き換える
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    preview: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let media_type = media_type.into();
        let preview = format!("data:{};base64,{}", media_type, STANDARD.encode(&bytes));
        Self {
            name: name.into(),
            media_type,
            bytes,
            preview,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// プレビュー用のData URL ("data:image/png;base64,...")
    pub fn preview_data_url(&self) -> &str {
        &self.preview
    }
}
