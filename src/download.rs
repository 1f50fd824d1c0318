//! エクスポートファイルの書き出し

use crate::error::Result;
use candidate_eval_common::DownloadFile;
use std::path::{Path, PathBuf};

/// ダウンロードしたファイルを保存
///
/// # Arguments
/// * `file` - エクスポート結果
/// * `output` - 出力先。既存ディレクトリまたは省略時はその中にサーバー指定の名前で保存
///
/// # Returns
/// 保存先パス
pub fn save_download(file: &DownloadFile, output: Option<&Path>) -> Result<PathBuf> {
    let path = match output {
        Some(path) if !path.is_dir() => path.to_path_buf(),
        Some(dir) => dir.join(safe_file_name(&file.filename)),
        None => PathBuf::from(".").join(safe_file_name(&file.filename)),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, &file.bytes)?;
    Ok(path)
}

/// サーバー指定のファイル名からディレクトリ部分を除く
fn safe_file_name(name: &str) -> String {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        "evaluation_results".to_string()
    } else {
        base.to_string()
    }
}
