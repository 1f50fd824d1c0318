//! 表示用データの導出
//!
//! Web・CLIの両方で同じ見出し・記号・数値表記を使うため、
//! 描画前のデータ整形をここにまとめる。

use crate::history::HistoryEntry;
use crate::types::{EvaluationResult, Rating, RatingItem};

/// カテゴリキー → 表示名（既知のもの）
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("required", "必須条件"),
    ("preferred", "優遇条件"),
    ("other", "その他評価ポイント"),
];

/// 項目キー → 表示名（既知のもの）
const ITEM_LABELS: &[(&str, &str)] = &[
    ("age", "年齢"),
    ("side_job", "副業"),
    ("outsourcing", "業務委託"),
    ("experience", "旅館・ホテル経験"),
    ("management_level", "役職レベル (アラサー時)"),
    ("job_change_desire", "転職希望"),
    ("adaptability", "適応力"),
    ("teamwork", "チームワーク"),
];

/// カテゴリの表示名（未知のキーはそのまま）
pub fn category_label(key: &str) -> &str {
    lookup(CATEGORY_LABELS, key).unwrap_or(key)
}

/// 項目の表示名（未知のキーはそのまま）
pub fn item_label(key: &str) -> &str {
    lookup(ITEM_LABELS, key).unwrap_or(key)
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, label)| *label)
}

/// 評価記号の表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingDisplay {
    pub icon: &'static str,
    pub label: &'static str,
    pub css_class: &'static str,
}

impl From<Rating> for RatingDisplay {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Excellent => Self { icon: "✓✓", label: "Excellent", css_class: "rating-excellent" },
            Rating::Good => Self { icon: "✓", label: "Good", css_class: "rating-good" },
            Rating::Fair => Self { icon: "~", label: "Fair", css_class: "rating-fair" },
            Rating::Poor => Self { icon: "✕", label: "Poor", css_class: "rating-poor" },
            Rating::Unknown => Self { icon: "?", label: "Unknown", css_class: "rating-unknown" },
        }
    }
}

/// マッチ度の表記（小数1桁、なければ "---"）
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}%", v),
        _ => "---".to_string(),
    }
}

/// プログレスバーの幅（0〜100にクランプ、値そのものは変更しない）
pub fn progress_width(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// 評価表の1行
#[derive(Debug, Clone, PartialEq)]
pub struct ScorecardRow {
    pub key: String,
    pub label: String,
    pub symbol: String,
    pub rating: Rating,
    pub display: RatingDisplay,
    /// 理由（空なら "-"）
    pub reason: String,
}

/// 評価表の1カテゴリ
#[derive(Debug, Clone, PartialEq)]
pub struct ScorecardSection {
    pub key: String,
    pub label: String,
    pub rows: Vec<ScorecardRow>,
}

/// 詳細パネル1枚分
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub candidate: String,
    pub percentage: Option<f64>,
    pub percentage_text: String,
    pub progress_width: f64,
    /// (表示名, 値) — バックエンドが返したカテゴリ別スコアのみ
    pub category_scores: Vec<(String, f64)>,
    pub sections: Vec<ScorecardSection>,
    pub overall_comment: Option<String>,
}

impl Scorecard {
    pub fn from_result(result: &EvaluationResult) -> Self {
        let scores = &result.calculated_scores;
        let category_scores = [
            ("required", scores.required_score),
            ("preferred", scores.preferred_score),
            ("other", scores.other_score),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (category_label(key).to_string(), v)))
        .collect();

        // 項目のないカテゴリは表示しない
        let sections = result
            .evaluation()
            .categories()
            .iter()
            .filter(|c| !c.items.is_empty())
            .map(|category| ScorecardSection {
                key: category.key.clone(),
                label: category_label(&category.key).to_string(),
                rows: category
                    .items
                    .iter()
                    .map(|(key, item)| row(key, item))
                    .collect(),
            })
            .collect();

        let percentage = result.total_match_percentage();

        Self {
            candidate: result.candidate_identifier().unwrap_or("---").to_string(),
            percentage,
            percentage_text: format_percentage(percentage),
            progress_width: progress_width(percentage),
            category_scores,
            sections,
            overall_comment: result.overall_comment().map(str::to_string),
        }
    }

    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self::from_result(&entry.result)
    }

    pub fn has_details(&self) -> bool {
        !self.sections.is_empty()
    }
}

fn row(key: &str, item: &RatingItem) -> ScorecardRow {
    let rating = item.rating();
    let reason = item.reason.trim();
    ScorecardRow {
        key: key.to_string(),
        label: item_label(key).to_string(),
        symbol: item.symbol.clone(),
        rating,
        display: RatingDisplay::from(rating),
        reason: if reason.is_empty() { "-".to_string() } else { reason.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_evaluate_response;

    #[test]
    fn test_labels_known_and_fallback() {
        assert_eq!(category_label("required"), "必須条件");
        assert_eq!(category_label("bonus"), "bonus");
        assert_eq!(item_label("side_job"), "副業");
        assert_eq!(item_label("english"), "english");
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(RatingDisplay::from(Rating::Excellent).icon, "✓✓");
        assert_eq!(RatingDisplay::from(Rating::Poor).css_class, "rating-poor");
        assert_eq!(RatingDisplay::from(Rating::Unknown).icon, "?");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Some(87.5)), "87.5%");
        assert_eq!(format_percentage(Some(80.0)), "80.0%");
        assert_eq!(format_percentage(None), "---");
        assert_eq!(format_percentage(Some(f64::NAN)), "---");
    }

    #[test]
    fn test_progress_width_clamps_visually() {
        assert_eq!(progress_width(Some(132.4)), 100.0);
        assert_eq!(progress_width(Some(-5.0)), 0.0);
        assert_eq!(progress_width(Some(42.0)), 42.0);
        assert_eq!(progress_width(None), 0.0);
    }

    #[test]
    fn test_scorecard_jane_doe() {
        let body = r#"{
            "gemini_evaluation": {
                "candidate_identifier": "Jane Doe",
                "evaluation": {"required": {"experience": {"symbol": "◎", "reason": "Strong fit"}}},
                "overall_comment": "Good candidate"
            },
            "calculated_scores": {"total_match_percentage": 87.5}
        }"#;
        let result = parse_evaluate_response(body.as_bytes()).unwrap();
        let card = Scorecard::from_result(&result);

        assert_eq!(card.candidate, "Jane Doe");
        assert_eq!(card.percentage, Some(87.5));
        assert_eq!(card.percentage_text, "87.5%");
        assert_eq!(card.sections.len(), 1);
        assert_eq!(card.sections[0].label, "必須条件");

        let row = &card.sections[0].rows[0];
        assert_eq!(row.label, "旅館・ホテル経験");
        assert_eq!(row.rating, Rating::Excellent);
        assert_eq!(row.display.label, "Excellent");
        assert_eq!(row.reason, "Strong fit");
        assert_eq!(card.overall_comment.as_deref(), Some("Good candidate"));
    }

    #[test]
    fn test_scorecard_unknown_keys_and_empty_sections() {
        let body = br#"{
            "gemini_evaluation": {
                "evaluation": {
                    "preferred": {},
                    "language": {"english": {"symbol": "??", "reason": ""}}
                }
            },
            "calculated_scores": {"total_match_percentage": 12.0, "required_score": 6.0, "other_score": 6.0}
        }"#;
        let result = parse_evaluate_response(body).unwrap();
        let card = Scorecard::from_result(&result);

        assert_eq!(card.candidate, "---");
        assert_eq!(card.sections.len(), 1);
        assert_eq!(card.sections[0].label, "language");
        assert_eq!(card.sections[0].rows[0].label, "english");
        assert_eq!(card.sections[0].rows[0].rating, Rating::Unknown);
        assert_eq!(card.sections[0].rows[0].reason, "-");
        assert_eq!(
            card.category_scores,
            vec![("必須条件".to_string(), 6.0), ("その他評価ポイント".to_string(), 6.0)]
        );
        assert!(card.overall_comment.is_none());
    }

    #[test]
    fn test_scorecard_without_details() {
        let card = Scorecard::from_result(&EvaluationResult::default());
        assert!(!card.has_details());
        assert_eq!(card.percentage_text, "---");
        assert_eq!(card.progress_width, 0.0);
    }
}
