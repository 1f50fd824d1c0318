//! 評価結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - RatingGrid: カテゴリ → 項目 → {記号, 理由} の評価表
//! - GeminiEvaluation: バックエンドが返す評価本体
//! - CalculatedScores: バックエンドが計算したマッチ度
//! - EvaluationResult: /evaluate の応答1件分（履歴・エクスポートの単位）
//!
//! フィールド名はバックエンドの応答と同じ snake_case。
//! 未知のフィールドは評価表の内側も含めて `extra` に保持し、
//! エクスポート時にそのまま送り返す。
//! 任意フィールドの型が想定と違っても応答全体は捨てない。

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 評価記号の表示カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl Rating {
    /// バックエンドの評価記号から判定
    ///
    /// `〇`（漢数字ゼロ）と `○`（白丸）はどちらも Good として扱う。
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "◎" => Rating::Excellent,
            "〇" | "○" => Rating::Good,
            "△" => Rating::Fair,
            "×" | "✕" => Rating::Poor,
            _ => Rating::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Fair => "fair",
            Rating::Poor => "poor",
            Rating::Unknown => "unknown",
        }
    }
}

/// 評価項目1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingItem {
    pub symbol: String,
    pub reason: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RatingItem {
    pub fn rating(&self) -> Rating {
        Rating::from_symbol(&self.symbol)
    }
}

/// 評価表の1カテゴリ（必須条件・優遇条件など）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingCategory {
    pub key: String,
    pub items: Vec<(String, RatingItem)>,
    /// オブジェクト以外の項目（表示しないが送り返す）
    pub extra: Map<String, Value>,
}

/// 評価表
///
/// カテゴリ・項目のキーはバックエンド定義で固定しない。
/// 応答に含まれていた順序をそのまま保持する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingGrid {
    categories: Vec<RatingCategory>,
    /// オブジェクト以外のカテゴリ（表示しないが送り返す）
    extra: Map<String, Value>,
}

impl RatingGrid {
    pub fn new(categories: Vec<RatingCategory>) -> Self {
        Self {
            categories,
            extra: Map::new(),
        }
    }

    pub fn categories(&self) -> &[RatingCategory] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&RatingCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn item(&self, category: &str, item: &str) -> Option<&RatingItem> {
        self.category(category)?
            .items
            .iter()
            .find(|(key, _)| key == item)
            .map(|(_, rating)| rating)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.items.is_empty())
    }

    /// JSONオブジェクトから評価表を組み立てる
    ///
    /// オブジェクト以外のカテゴリ・項目は表示対象から外し、`extra` に残す。
    fn from_json_map(map: Map<String, Value>) -> Self {
        let mut grid = Self::default();
        for (key, value) in map {
            match value {
                Value::Object(items) => {
                    grid.categories.push(RatingCategory::from_json_map(key, items));
                }
                other => {
                    grid.extra.insert(key, other);
                }
            }
        }
        grid
    }
}

impl RatingCategory {
    fn from_json_map(key: String, map: Map<String, Value>) -> Self {
        let mut category = Self {
            key,
            ..Default::default()
        };
        for (item_key, details) in map {
            match details {
                Value::Object(details) => {
                    category.items.push((item_key, RatingItem::from_json_map(details)));
                }
                other => {
                    category.extra.insert(item_key, other);
                }
            }
        }
        category
    }
}

impl RatingItem {
    /// symbol / reason が文字列でなくても読めるようにする
    fn from_json_map(mut map: Map<String, Value>) -> Self {
        Self {
            symbol: take_string(&mut map, "symbol"),
            reason: take_string(&mut map, "reason"),
            extra: map,
        }
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> String {
    match map.remove(key) {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl Serialize for RatingGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len() + self.extra.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.key, category)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for RatingCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len() + self.extra.len()))?;
        for (key, item) in &self.items {
            map.serialize_entry(key, item)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RatingGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_json_map(map))
    }
}

/// 文字列以外（数値など）は文字列化して受け取る
fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// 数値として読めない値は未設定扱い（数値文字列は受け付ける）
fn lenient_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// バックエンドの評価本体（`gemini_evaluation`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeminiEvaluation {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub candidate_identifier: Option<String>,

    #[serde(default)]
    pub evaluation: RatingGrid,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub overall_comment: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// バックエンドが計算したスコア（`calculated_scores`）
///
/// 値はクランプしない。0〜100の範囲外でもそのまま保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatedScores {
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub total_match_percentage: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub required_score: Option<f64>,     // 必須

    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub preferred_score: Option<f64>,    // 優遇

    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub other_score: Option<f64>,        // その他

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 評価結果1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub gemini_evaluation: GeminiEvaluation,
    pub calculated_scores: CalculatedScores,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EvaluationResult {
    /// 候補者名（空文字は未設定扱い）
    pub fn candidate_identifier(&self) -> Option<&str> {
        self.gemini_evaluation
            .candidate_identifier
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn total_match_percentage(&self) -> Option<f64> {
        self.calculated_scores.total_match_percentage
    }

    pub fn overall_comment(&self) -> Option<&str> {
        self.gemini_evaluation
            .overall_comment
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn evaluation(&self) -> &RatingGrid {
        &self.gemini_evaluation.evaluation
    }
}
