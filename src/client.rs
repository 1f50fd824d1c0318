//! 評価APIクライアント（reqwest）
//!
//! 成否はHTTPステータスで一度だけ判定し、ボディの解釈は
//! candidate_eval_common のパーサーに任せる。

use crate::error::Result;
use async_trait::async_trait;
use candidate_eval_common::{
    evaluate_error, export_error, parse_evaluate_response, parse_health_response, ApiEndpoints,
    ApiError, EvaluateRequest, EvaluationBackend, EvaluationResult, ExportPayload, ExportRequest,
    HealthStatus,
};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// HTTP経由の評価バックエンド
pub struct HttpBackend {
    client: Client,
    endpoints: ApiEndpoints,
}

impl HttpBackend {
    pub fn new(endpoints: ApiEndpoints, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn read_body(response: Response) -> std::result::Result<Vec<u8>, ApiError> {
    let bytes = response.bytes().await.map_err(transport)?;
    Ok(bytes.to_vec())
}

fn header(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait(?Send)]
impl EvaluationBackend for HttpBackend {
    async fn evaluate(&self, request: &EvaluateRequest) -> std::result::Result<EvaluationResult, ApiError> {
        let response = self
            .client
            .post(&self.endpoints.evaluate)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!(%status, url = %self.endpoints.evaluate, "評価応答");
        let body = read_body(response).await?;

        if !status.is_success() {
            return Err(evaluate_error(status.as_u16(), &body));
        }

        parse_evaluate_response(&body)
    }

    async fn export(&self, request: &ExportRequest) -> std::result::Result<ExportPayload, ApiError> {
        let response = self
            .client
            .post(&self.endpoints.export)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!(%status, url = %self.endpoints.export, "エクスポート応答");
        let content_type = header(&response, CONTENT_TYPE);
        let content_disposition = header(&response, CONTENT_DISPOSITION);
        let bytes = read_body(response).await?;

        if !status.is_success() {
            return Err(export_error(status.as_u16(), &bytes));
        }

        Ok(ExportPayload {
            bytes,
            content_type,
            content_disposition,
        })
    }

    async fn health(&self) -> std::result::Result<HealthStatus, ApiError> {
        let response = self
            .client
            .get(&self.endpoints.health)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = read_body(response).await?;

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: format!("HTTP {}", status),
                payload: Some(String::from_utf8_lossy(&body).into_owned()),
            });
        }

        Ok(parse_health_response(&body))
    }
}
