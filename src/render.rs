//! ターミナル表示

use candidate_eval_common::display::{Scorecard, ScorecardSection};
use candidate_eval_common::{Connectivity, ErrorState, History};

const BAR_WIDTH: usize = 30;

/// 詳細パネル相当の表示
pub fn scorecard(card: &Scorecard) -> String {
    let mut out = String::new();

    out.push_str(&format!("■ {}\n", card.candidate));
    out.push_str(&format!(
        "  マッチ度: {} {}\n",
        bar(card.progress_width),
        card.percentage_text
    ));

    for (label, score) in &card.category_scores {
        out.push_str(&format!("    {}: {:.1}\n", label, score));
    }

    if card.has_details() {
        for section in &card.sections {
            out.push_str(&self::section(section));
        }
    } else {
        out.push_str("\n  評価詳細はありません\n");
    }

    if let Some(comment) = &card.overall_comment {
        out.push_str(&format!("\n  総評: {}\n", comment));
    }

    out
}

fn section(section: &ScorecardSection) -> String {
    let mut out = format!("\n  [{}]\n", section.label);
    for row in &section.rows {
        out.push_str(&format!(
            "    {} {} {} - {}\n",
            row.display.icon, row.symbol, row.label, row.reason
        ));
    }
    out
}

/// プログレスバー（幅は0〜100のクランプ済み値）
fn bar(width: f64) -> String {
    let filled = ((width / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// 履歴一覧（選択中に `>` を付ける）
pub fn history_list(history: &History, active: Option<candidate_eval_common::EntryId>) -> String {
    if history.is_empty() {
        return "履歴はまだありません\n".to_string();
    }

    history
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let marker = if Some(entry.id) == active { ">" } else { " " };
            let card = Scorecard::from_entry(entry);
            format!(
                "{} {:>2}. {} ({})\n",
                marker,
                i + 1,
                history.display_label(i),
                card.percentage_text
            )
        })
        .collect()
}

pub fn connectivity(status: &Connectivity) -> String {
    let icon = if status.is_checking() {
        "…"
    } else if status.connected {
        "●"
    } else {
        "✕"
    };
    format!("{} {}", icon, status.message)
}

pub fn error(state: &ErrorState, verbose: bool) -> String {
    match (&state.detail, verbose) {
        (Some(detail), true) => format!("✕ {}\n  詳細: {}", state.message, detail),
        _ => format!("✕ {}", state.message),
    }
}
