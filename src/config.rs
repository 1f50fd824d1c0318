use crate::error::{CandidateEvalError, Result};
use candidate_eval_common::{ApiEndpoints, ExportFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIのベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "CANDIDATE_EVAL_API_URL";

pub const DEFAULT_API_BASE: &str = "http://localhost:5001/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    /// 省略時は api_base のオリジン直下
    pub health_url: Option<String>,
    pub timeout_seconds: u64,
    pub default_format: ExportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            health_url: None,
            timeout_seconds: 120,
            default_format: ExportFormat::Csv,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（ファイルがなければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CandidateEvalError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("candidate-eval").join("config.json"))
    }

    /// 実際に使うAPIベースURL
    ///
    /// 優先順: コマンドライン > 環境変数 > 設定ファイル
    pub fn resolve_api_base(&self, cli_override: Option<&str>) -> String {
        let env = std::env::var(API_URL_ENV).ok();
        pick_api_base(cli_override, env.as_deref(), &self.api_base)
    }

    pub fn endpoints(&self, api_base: &str, health_override: Option<&str>) -> ApiEndpoints {
        let health = health_override.or(self.health_url.as_deref());
        ApiEndpoints::new(api_base, health)
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        self.api_base = validate_url(&url)?;
        self.save()
    }
}

fn pick_api_base(cli: Option<&str>, env: Option<&str>, configured: &str) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(configured)
        .to_string()
}

fn validate_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(CandidateEvalError::Config(format!(
            "URLは http:// または https:// で始めてください: {}",
            url
        )))
    }
}
