//! 評価API連携（fetch）
//!
//! 成否は `Response.ok` で一度だけ判定する。ボディはバイト列として読み、
//! 解釈は candidate_eval_common のパーサーに任せる。

use async_trait::async_trait;
use candidate_eval_common::{
    evaluate_error, export_error, parse_evaluate_response, parse_health_response, ApiEndpoints,
    ApiError, EvaluateRequest, EvaluationBackend, EvaluationResult, ExportPayload, ExportRequest,
    HealthStatus,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ブラウザの fetch を使う評価バックエンド
#[derive(Debug, Clone)]
pub struct FetchBackend {
    endpoints: ApiEndpoints,
}

impl FetchBackend {
    pub fn new(endpoints: ApiEndpoints) -> Self {
        Self { endpoints }
    }
}

fn transport(e: JsValue) -> ApiError {
    ApiError::Transport(format!("{:?}", e))
}

/// fetch 呼び出し（共通処理）
async fn call_api(url: &str, method: &str, body: Option<String>) -> Result<Response, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport)?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Transport("window がありません".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    resp_value.dyn_into().map_err(transport)
}

/// 応答ボディをバイト列で読む（エクスポートはバイナリ）
async fn read_bytes(resp: &Response) -> Result<Vec<u8>, ApiError> {
    let buffer = JsFuture::from(resp.array_buffer().map_err(transport)?)
        .await
        .map_err(transport)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn header(resp: &Response, name: &str) -> Option<String> {
    resp.headers().get(name).ok().flatten()
}

fn encode_error(e: serde_json::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

#[async_trait(?Send)]
impl EvaluationBackend for FetchBackend {
    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluationResult, ApiError> {
        let body = serde_json::to_string(request).map_err(encode_error)?;
        let resp = call_api(&self.endpoints.evaluate, "POST", Some(body)).await?;
        let body = read_bytes(&resp).await?;

        if !resp.ok() {
            return Err(evaluate_error(resp.status(), &body));
        }

        parse_evaluate_response(&body)
    }

    async fn export(&self, request: &ExportRequest) -> Result<ExportPayload, ApiError> {
        let body = serde_json::to_string(request).map_err(encode_error)?;
        let resp = call_api(&self.endpoints.export, "POST", Some(body)).await?;
        let bytes = read_bytes(&resp).await?;

        if !resp.ok() {
            return Err(export_error(resp.status(), &bytes));
        }

        // Content-Disposition はバックエンドが CORS で公開している場合のみ読める
        Ok(ExportPayload {
            bytes,
            content_type: header(&resp, "Content-Type"),
            content_disposition: header(&resp, "Content-Disposition"),
        })
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let resp = call_api(&self.endpoints.health, "GET", None).await?;
        let body = read_bytes(&resp).await?;

        if !resp.ok() {
            return Err(ApiError::Server {
                status: resp.status(),
                message: format!("HTTP {}", resp.status()),
                payload: Some(String::from_utf8_lossy(&body).into_owned()),
            });
        }

        Ok(parse_health_response(&body))
    }
}
