//! エラー型定義

use thiserror::Error;

/// 汎用の評価失敗メッセージ（サーバーがメッセージを返さなかった場合）
pub const DEFAULT_EVALUATE_ERROR: &str = "解析中にエラーが発生しました";

/// 汎用のエクスポート失敗メッセージ
pub const DEFAULT_EXPORT_ERROR: &str = "エクスポートに失敗しました";

/// 応答形式が想定外だった場合のメッセージ
pub const UNEXPECTED_SHAPE_ERROR: &str = "サーバーから予期しない形式の応答を受信しました";

/// バックエンド呼び出しの失敗
///
/// API境界で一度だけ判定し、以降は応答の中身から成否を推測しない。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 接続不可・タイムアウトなど
    #[error("サーバーとの通信に失敗しました: {0}")]
    Transport(String),

    /// 4xx/5xx（メッセージは error → details → 汎用 の優先順で決定済み）
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        payload: Option<String>,
    },

    /// 成功応答だが evaluation / calculated_scores が欠けている
    ///
    /// 2xxでも `error` フィールドが返ることがあるため、その文言を別に持つ。
    #[error("サーバーから予期しない形式の応答を受信しました")]
    UnexpectedShape {
        payload: Option<String>,
        server_error: Option<String>,
    },
}

impl ApiError {
    /// 利用者に表示するメッセージ
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "サーバーとの通信に失敗しました".to_string(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::UnexpectedShape { .. } => UNEXPECTED_SHAPE_ERROR.to_string(),
        }
    }

    /// 診断表示用の生データ
    pub fn payload(&self) -> Option<&str> {
        match self {
            ApiError::Transport(detail) => Some(detail),
            ApiError::Server { payload, .. } | ApiError::UnexpectedShape { payload, .. } => {
                payload.as_deref()
            }
        }
    }

    /// エラー表示の詳細欄（サーバーの `error` 文言があればそれ、なければ生データ）
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::UnexpectedShape {
                server_error: Some(message),
                ..
            } => Some(message),
            _ => self.payload(),
        }
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("候補者情報を入力してください")]
    EmptyInput,

    #[error("解析中です。完了までお待ちください")]
    Busy,

    #[error("エクスポートする結果がありません")]
    NothingToExport,

    #[error("セッションは既に終了しています")]
    SessionClosed,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
