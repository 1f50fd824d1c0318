use thiserror::Error;

#[derive(Error, Debug)]
pub enum CandidateEvalError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("候補者情報が指定されていません。引数か --file で指定してください")]
    MissingInput,

    #[error("履歴ファイルが不正: {0}")]
    InvalidResults(String),

    #[error("番号 {index} の結果がありません（{len}件）")]
    NoSuchEntry { index: usize, len: usize },

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] candidate_eval_common::Error),
}

impl From<candidate_eval_common::ApiError> for CandidateEvalError {
    fn from(e: candidate_eval_common::ApiError) -> Self {
        Self::Common(e.into())
    }
}

impl From<dialoguer::Error> for CandidateEvalError {
    fn from(e: dialoguer::Error) -> Self {
        Self::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CandidateEvalError>;
