//! ダウンロードファイル名の決定

use super::ExportFormat;
use lazy_static::lazy_static;
use regex::Regex;

/// Content-Dispositionにファイル名がない場合の名前
pub const DEFAULT_FILE_STEM: &str = "evaluation_results";

lazy_static! {
    // filename*="name.csv" / filename*=UTF-8''name.csv
    static ref EXTENDED_RE: Regex = Regex::new(
        r#"(?i)filename\*\s*=\s*(?:"([^"]*)"|(?:[\w!#$%&+^`{}~-]+'[\w-]*')?([^;]+))"#
    )
    .unwrap();
    // filename="name.csv" / filename=name.csv
    static ref PLAIN_RE: Regex =
        Regex::new(r#"(?i)(?:^|;)\s*filename\s*=\s*(?:"([^"]*)"|([^;\s]+))"#).unwrap();
}

/// Content-Dispositionヘッダーからファイル名を取り出す
///
/// `filename*` を優先し、なければ `filename` を使う。
/// 引用符と `UTF-8''` の文字コード指定だけを外し、それ以上の復号はしない。
/// 引用符の内側はアポストロフィやセミコロンも含めてそのまま使う。
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    [&*EXTENDED_RE, &*PLAIN_RE].iter().find_map(|re| {
        re.captures(header)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

/// 保存ファイル名を決定
///
/// # Arguments
/// * `content_disposition` - 応答のContent-Dispositionヘッダー
/// * `format` - 要求したエクスポート形式
///
/// # Returns
/// ヘッダーのファイル名、なければ `evaluation_results.<csv|md>`
pub fn derive_filename(content_disposition: Option<&str>, format: ExportFormat) -> String {
    content_disposition
        .and_then(filename_from_content_disposition)
        .unwrap_or_else(|| format!("{}.{}", DEFAULT_FILE_STEM, format.extension()))
}
