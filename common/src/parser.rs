//! APIレスポンスパーサー
//!
//! バックエンドの応答ボディ（バイト列）を、成功なら型付きの値に、
//! 失敗なら利用者向けメッセージに変換する。
//! HTTPクライアント（reqwest / fetch）に依存しない。

use crate::backend::HealthStatus;
use crate::error::{ApiError, DEFAULT_EVALUATE_ERROR, DEFAULT_EXPORT_ERROR};
use crate::types::EvaluationResult;
use serde_json::Value;

/// 診断表示用に保持する生データの最大文字数
const MAX_PAYLOAD_CHARS: usize = 2000;

/// /evaluate の成功応答をパース
///
/// `gemini_evaluation.evaluation` と `calculated_scores` の両方が
/// オブジェクトとして存在すれば成功とする。任意フィールドの型違いでは失敗しない。
///
/// # Arguments
/// * `body` - 応答ボディ
///
/// # Returns
/// * `Ok(EvaluationResult)` - 形式が正しい
/// * `Err(ApiError::UnexpectedShape)` - JSONでない、または必須フィールドが欠けている
pub fn parse_evaluate_response(body: &[u8]) -> Result<EvaluationResult, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::UnexpectedShape {
        payload: Some(payload_preview(body)),
        server_error: None,
    })?;
    let server_error = non_empty_str(&value, "error").map(str::to_string);
    let shape_error = || ApiError::UnexpectedShape {
        payload: Some(payload_preview(body)),
        server_error: server_error.clone(),
    };

    let has_evaluation = value
        .get("gemini_evaluation")
        .and_then(|g| g.get("evaluation"))
        .is_some_and(Value::is_object);
    let has_scores = value
        .get("calculated_scores")
        .is_some_and(Value::is_object);

    if !has_evaluation || !has_scores {
        return Err(shape_error());
    }

    serde_json::from_value(value).map_err(|_| shape_error())
}

/// /evaluate のエラー応答からメッセージを決定
///
/// 優先順位:
/// 1. `error` フィールド
/// 2. `details` フィールド
/// 3. 汎用メッセージ
pub fn evaluate_error_message(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return DEFAULT_EVALUATE_ERROR.to_string();
    };

    non_empty_str(&value, "error")
        .or_else(|| non_empty_str(&value, "details"))
        .unwrap_or(DEFAULT_EVALUATE_ERROR)
        .to_string()
}

/// /export のエラー応答からメッセージを決定
///
/// エラーはバイナリ（Blob）として届くため、UTF-8として復号してから
/// JSONとして読む。どちらかに失敗した場合は汎用メッセージ。
pub fn export_error_message(body: &[u8]) -> String {
    std::str::from_utf8(body)
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(text).ok())
        .and_then(|value| non_empty_str(&value, "error").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_EXPORT_ERROR.to_string())
}

/// /evaluate のエラー応答を ApiError に変換
pub fn evaluate_error(status: u16, body: &[u8]) -> ApiError {
    ApiError::Server {
        status,
        message: evaluate_error_message(body),
        payload: non_empty_payload(body),
    }
}

/// /export のエラー応答を ApiError に変換
pub fn export_error(status: u16, body: &[u8]) -> ApiError {
    ApiError::Server {
        status,
        message: export_error_message(body),
        payload: non_empty_payload(body),
    }
}

/// ヘルスチェック応答をパース
///
/// ボディがJSONでなくても2xxであれば接続済みとみなすため、失敗しない。
pub fn parse_health_response(body: &[u8]) -> HealthStatus {
    serde_json::from_slice(body).unwrap_or_default()
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn non_empty_payload(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(payload_preview(body))
    }
}

fn payload_preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(MAX_PAYLOAD_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rating;

    // =============================================
    // /evaluate 成功応答
    // =============================================

    #[test]
    fn test_parse_evaluate_response_valid() {
        let body = r#"{
            "gemini_evaluation": {
                "candidate_identifier": "Jane Doe",
                "evaluation": {"required": {"experience": {"symbol": "◎", "reason": "Strong fit"}}},
                "overall_comment": "Good candidate"
            },
            "calculated_scores": {"total_match_percentage": 87.5}
        }"#;

        let result = parse_evaluate_response(body.as_bytes()).expect("パース失敗");
        assert_eq!(result.total_match_percentage(), Some(87.5));
        let item = result.evaluation().item("required", "experience").unwrap();
        assert_eq!(item.rating(), Rating::Excellent);
    }

    #[test]
    fn test_parse_evaluate_response_missing_scores() {
        let body = br#"{"gemini_evaluation": {"evaluation": {}}}"#;
        let err = parse_evaluate_response(body).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_parse_evaluate_response_missing_evaluation() {
        let body = br#"{"gemini_evaluation": {"candidate_identifier": "A"}, "calculated_scores": {}}"#;
        let err = parse_evaluate_response(body).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_parse_evaluate_response_null_evaluation() {
        let body = br#"{"gemini_evaluation": {"evaluation": null}, "calculated_scores": {}}"#;
        assert!(parse_evaluate_response(body).is_err());
    }

    #[test]
    fn test_parse_evaluate_response_not_json() {
        let err = parse_evaluate_response(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.payload(), Some("<html>502 Bad Gateway</html>"));
    }

    #[test]
    fn test_parse_evaluate_response_wrong_score_type() {
        let body = br#"{
            "gemini_evaluation": {"evaluation": {}},
            "calculated_scores": {"total_match_percentage": "high"}
        }"#;
        let result = parse_evaluate_response(body).expect("パース失敗");
        assert_eq!(result.total_match_percentage(), None);
    }

    #[test]
    fn test_parse_evaluate_response_numeric_identifier() {
        let body = br#"{
            "gemini_evaluation": {"candidate_identifier": 42, "evaluation": {"required": {}}},
            "calculated_scores": {"total_match_percentage": 80.0}
        }"#;
        let result = parse_evaluate_response(body).expect("パース失敗");
        assert_eq!(result.candidate_identifier(), Some("42"));
        assert_eq!(result.total_match_percentage(), Some(80.0));
    }

    #[test]
    fn test_parse_evaluate_response_error_body_with_ok_status() {
        let body = br#"{"error": "Gemini returned non-JSON response"}"#;
        match parse_evaluate_response(body).unwrap_err() {
            ApiError::UnexpectedShape { payload, server_error } => {
                assert_eq!(server_error.as_deref(), Some("Gemini returned non-JSON response"));
                assert!(payload.is_some());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    // =============================================
    // エラーメッセージ決定
    // =============================================

    #[test]
    fn test_evaluate_error_message_prefers_error_field() {
        let body = br#"{"error": "Evaluation failed by gemini_service", "details": "quota"}"#;
        assert_eq!(evaluate_error_message(body), "Evaluation failed by gemini_service");
    }

    #[test]
    fn test_evaluate_error_message_falls_back_to_details() {
        let body = br#"{"details": "quota exceeded"}"#;
        assert_eq!(evaluate_error_message(body), "quota exceeded");
    }

    #[test]
    fn test_evaluate_error_message_default() {
        assert_eq!(evaluate_error_message(b"{}"), DEFAULT_EVALUATE_ERROR);
        assert_eq!(evaluate_error_message(b""), DEFAULT_EVALUATE_ERROR);
        assert_eq!(evaluate_error_message(br#"{"error": ""}"#), DEFAULT_EVALUATE_ERROR);
    }

    #[test]
    fn test_evaluate_error_keeps_payload() {
        let err = evaluate_error(500, br#"{"error": "boom"}"#);
        match err {
            ApiError::Server { status, message, payload } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
                assert_eq!(payload.as_deref(), Some(r#"{"error": "boom"}"#));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_export_error_message_from_blob_json() {
        let body = "{\"error\": \"結果リストが空です\"}".as_bytes();
        assert_eq!(export_error_message(body), "結果リストが空です");
    }

    #[test]
    fn test_export_error_message_undecodable() {
        assert_eq!(export_error_message(&[0xff, 0xfe, 0x00]), DEFAULT_EXPORT_ERROR);
        assert_eq!(export_error_message(b"Internal Server Error"), DEFAULT_EXPORT_ERROR);
    }

    #[test]
    fn test_export_error_empty_body_has_no_payload() {
        let err = export_error(502, b"");
        assert_eq!(err.payload(), None);
        assert_eq!(err.user_message(), DEFAULT_EXPORT_ERROR);
    }

    // =============================================
    // ヘルスチェック
    // =============================================

    #[test]
    fn test_parse_health_response() {
        let status = parse_health_response(br#"{"status": "ok", "message": "Backend is running!"}"#);
        assert_eq!(status.message.as_deref(), Some("Backend is running!"));
        assert_eq!(status.status.as_deref(), Some("ok"));
    }

    #[test]
    fn test_parse_health_response_plain_text() {
        let status = parse_health_response(b"OK");
        assert_eq!(status.message, None);
    }
}
