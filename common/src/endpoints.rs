//! APIエンドポイント
//!
//! APIベースURLは起動時に1回だけ読み込む。未設定なら相対パス `/api`
//! （リバースプロキシ配下の同一オリジン配置）。

/// 既定のAPIベース
pub const DEFAULT_API_BASE: &str = "/api";

/// 評価APIのURL一式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub evaluate: String,
    pub export: String,
    pub health: String,
}

impl ApiEndpoints {
    /// APIベースからURLを組み立てる
    ///
    /// # Arguments
    /// * `api_base` - 例: `http://localhost:5001/api`, `/api`
    /// * `health_override` - ヘルスチェックURLを明示する場合
    pub fn new(api_base: &str, health_override: Option<&str>) -> Self {
        let api_base = normalize_base(api_base);
        let health = health_override
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| health_check_url(&api_base));

        Self {
            evaluate: format!("{}/evaluate", api_base),
            export: format!("{}/export", api_base),
            health,
        }
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, None)
    }
}

/// APIベースからヘルスチェックURLを導出
///
/// 絶対URLならそのホストのルート（`scheme://host/`）、
/// 相対パスならページと同じオリジンのルート `/`。
pub fn health_check_url(api_base: &str) -> String {
    let api_base = api_base.trim();
    let Some(scheme_end) = api_base.find("://") else {
        return "/".to_string();
    };

    let scheme = &api_base[..scheme_end];
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return "/".to_string();
    }

    let rest = &api_base[scheme_end + 3..];
    let host = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    if host.is_empty() {
        return "/".to_string();
    }

    format!("{}://{}/", scheme, host)
}

fn normalize_base(api_base: &str) -> String {
    let trimmed = api_base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}
