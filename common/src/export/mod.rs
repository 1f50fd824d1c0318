//! エクスポート設定とダウンロードファイル
//!
//! CSV/Markdownの生成自体はバックエンドが行う。
//! ここでは形式の選択・対象範囲・ファイル名の決定だけを扱う。

mod filename;

pub use filename::{derive_filename, filename_from_content_disposition, DEFAULT_FILE_STEM};

use serde::{Deserialize, Serialize};

/// エクスポート形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    #[serde(rename = "csv")]
    Csv,
    #[serde(rename = "md")]
    Markdown,
}

impl ExportFormat {
    /// リクエストの `format` に入る値
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// 表示名
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Markdown => "Markdown",
        }
    }

    /// 応答にContent-Typeがない場合に使うMIMEタイプ
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use csv or md", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// エクスポート対象
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportScope {
    /// 履歴すべて（既定）
    #[default]
    AllHistory,
    /// 選択中の結果のみ
    Selected,
}

/// 保存するファイル
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
