//! バックエンド抽象化
//!
//! 評価APIとの通信はこのトレイトを通す。
//! CLIは reqwest、Web(WASM)は fetch で実装し、テストではモックを使う。

use crate::error::ApiError;
use crate::export::ExportFormat;
use crate::types::EvaluationResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// POST /evaluate のリクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluateRequest {
    pub candidate_text: String,
}

/// POST /export のリクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub results_list: Vec<EvaluationResult>,
    pub format: ExportFormat,
}

/// POST /export の成功応答
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

/// GET / の応答
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// 評価バックエンド
///
/// 実装は成功/失敗をここで確定させる。
/// `evaluate` は形式チェック済みの結果だけを `Ok` で返すこと。
#[async_trait(?Send)]
pub trait EvaluationBackend {
    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluationResult, ApiError>;

    async fn export(&self, request: &ExportRequest) -> Result<ExportPayload, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
