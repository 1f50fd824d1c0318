//! 評価結果の保存ファイル
//!
//! 形式はバックエンドの `results_list` と同じ JSON 配列（新しい順）。

use crate::error::{CandidateEvalError, Result};
use candidate_eval_common::EvaluationResult;
use std::path::Path;

/// 保存済みの結果を読み込み
pub fn load_results(path: &Path) -> Result<Vec<EvaluationResult>> {
    if !path.exists() {
        return Err(CandidateEvalError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let results: Vec<EvaluationResult> = serde_json::from_str(&content)
        .map_err(|e| CandidateEvalError::InvalidResults(format!("{}: {}", path.display(), e)))?;
    Ok(results)
}

/// 結果を先頭に追記（ファイルがなければ新規作成）
///
/// # Returns
/// 追記後の件数
pub fn prepend_result(path: &Path, result: &EvaluationResult) -> Result<usize> {
    let mut results = if path.exists() { load_results(path)? } else { Vec::new() };
    results.insert(0, result.clone());
    save_results(path, &results)?;
    Ok(results.len())
}

pub fn save_results(path: &Path, results: &[EvaluationResult]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    Ok(())
}
