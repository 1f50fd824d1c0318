//! 評価セッションの状態
//!
//! 1セッション（ブラウザのタブ1つ、CLIの対話1回）分の状態を持つ。
//! 永続化はしない。状態遷移はすべてこのモジュールのメソッドで行い、
//! 通信（await）は orchestrator 側に置く。
//!
//! 1回の評価サイクル: Idle → Loading → (Success | Failure) → Idle

use crate::backend::{EvaluateRequest, ExportRequest, HealthStatus};
use crate::error::{ApiError, Error, Result};
use crate::export::{ExportFormat, ExportScope};
use crate::history::{EntryId, History, HistoryEntry};
use crate::types::EvaluationResult;
use std::cell::RefCell;
use std::rc::Rc;

pub const CHECKING_MESSAGE: &str = "接続確認中...";
pub const CONNECTED_MESSAGE: &str = "接続済み";
pub const CONNECTION_FAILED_MESSAGE: &str = "接続失敗";

/// バックエンドとの接続状態
#[derive(Debug, Clone, PartialEq)]
pub struct Connectivity {
    pub connected: bool,
    pub message: String,
    checked: bool,
}

impl Connectivity {
    /// 起動直後（確認中）
    pub fn checking() -> Self {
        Self {
            connected: false,
            message: CHECKING_MESSAGE.to_string(),
            checked: false,
        }
    }

    /// ヘルスチェック結果から生成
    pub fn from_probe(result: &std::result::Result<HealthStatus, ApiError>) -> Self {
        match result {
            Ok(status) => Self {
                connected: true,
                message: status
                    .message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(CONNECTED_MESSAGE)
                    .to_string(),
                checked: true,
            },
            Err(_) => Self {
                connected: false,
                message: CONNECTION_FAILED_MESSAGE.to_string(),
                checked: true,
            },
        }
    }

    pub fn is_checking(&self) -> bool {
        !self.checked
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::checking()
    }
}

/// 表示中のエラー
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
    /// 診断用の生データ
    pub detail: Option<String>,
}

impl From<&ApiError> for ErrorState {
    fn from(error: &ApiError) -> Self {
        Self {
            message: error.user_message(),
            detail: error.detail().map(str::to_string),
        }
    }
}

/// セッション状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub connectivity: Connectivity,
    /// 入力欄（送信後も自動ではクリアしない）
    pub input_text: String,
    pub export_format: ExportFormat,
    history: History,
    active: Option<EntryId>,
    error: Option<ErrorState>,
    is_loading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn active_id(&self) -> Option<EntryId> {
        self.active
    }

    /// 選択中（または最新）の結果
    ///
    /// IDが履歴にない場合は None（宙に浮いた参照にはならない）。
    pub fn active_result(&self) -> Option<&HistoryEntry> {
        self.active.and_then(|id| self.history.get(id))
    }

    /// 詳細パネルに表示する結果
    ///
    /// エラー表示中は None（エラーと詳細は同時に出さない）。
    pub fn active_display_result(&self) -> Option<&HistoryEntry> {
        if self.error.is_some() {
            None
        } else {
            self.active_result()
        }
    }

    /// 接続状態を記録（最初の1回だけ反映）
    pub fn set_connectivity(&mut self, connectivity: Connectivity) -> bool {
        if !self.connectivity.is_checking() {
            return false;
        }
        self.connectivity = connectivity;
        true
    }

    /// 評価開始
    ///
    /// 空入力・解析中はリジェクトし、状態は変更しない。
    /// 受け付けた場合は Loading に入り、選択とエラーをクリアする。
    pub fn begin_submission(&mut self, text: &str) -> Result<EvaluateRequest> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.is_loading {
            return Err(Error::Busy);
        }

        self.is_loading = true;
        self.active = None;
        self.error = None;

        Ok(EvaluateRequest {
            candidate_text: text.to_string(),
        })
    }

    /// 評価完了
    ///
    /// 成功なら履歴の先頭に追加して選択、失敗ならエラーを記録する。
    /// どちらの場合も Loading を抜ける。
    pub fn finish_submission(
        &mut self,
        outcome: std::result::Result<EvaluationResult, ApiError>,
    ) -> std::result::Result<EntryId, ApiError> {
        self.is_loading = false;
        match outcome {
            Ok(result) => {
                let id = self.history.push_front(result);
                self.active = Some(id);
                Ok(id)
            }
            Err(error) => {
                self.error = Some(ErrorState::from(&error));
                Err(error)
            }
        }
    }

    /// 保存済みの結果（新しい順）を履歴に読み込み、最新を選択する
    pub fn restore_history(&mut self, results: Vec<EvaluationResult>) -> usize {
        let count = results.len();
        for result in results.into_iter().rev() {
            let id = self.history.push_front(result);
            self.active = Some(id);
        }
        count
    }

    /// 完了を待たずに評価が打ち切られた場合
    pub fn abandon_submission(&mut self) {
        self.is_loading = false;
    }

    /// 履歴から選択
    ///
    /// 解析中でも選択できる（進行中のリクエストは取り消さない）。
    pub fn select(&mut self, id: EntryId) -> bool {
        if !self.history.contains(id) {
            return false;
        }
        self.active = Some(id);
        self.error = None;
        true
    }

    /// エクスポートリクエストを組み立てる
    pub fn export_request(&self, scope: ExportScope) -> Result<ExportRequest> {
        let results_list = match scope {
            ExportScope::AllHistory => self.history.results(),
            ExportScope::Selected => self
                .active_result()
                .map(|entry| vec![entry.result.clone()])
                .unwrap_or_default(),
        };

        if results_list.is_empty() {
            return Err(Error::NothingToExport);
        }

        Ok(ExportRequest {
            results_list,
            format: self.export_format,
        })
    }
}

/// セッション状態の置き場所
///
/// CLIは `RefCell<Session>`、Webはリアクティブシグナルで実装する。
/// 置き場所が既に破棄されている場合は None を返す。
pub trait SessionStore {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R>;

    fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R>;
}

impl SessionStore for RefCell<Session> {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        (**self).update(f)
    }

    fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        (**self).with(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CalculatedScores, GeminiEvaluation};

    fn result(name: &str, score: f64) -> EvaluationResult {
        EvaluationResult {
            gemini_evaluation: GeminiEvaluation {
                candidate_identifier: Some(name.to_string()),
                ..Default::default()
            },
            calculated_scores: CalculatedScores {
                total_match_percentage: Some(score),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn server_error(message: &str) -> ApiError {
        ApiError::Server {
            status: 500,
            message: message.to_string(),
            payload: None,
        }
    }

    #[test]
    fn test_new_session_state() {
        let session = Session::new();
        assert!(session.connectivity.is_checking());
        assert_eq!(session.connectivity.message, CHECKING_MESSAGE);
        assert!(session.history().is_empty());
        assert!(session.active_result().is_none());
        assert!(session.error().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.export_format, ExportFormat::Csv);
    }

    #[test]
    fn test_begin_rejects_blank_text_without_mutation() {
        let mut session = Session::new();
        session.finish_submission(Err(server_error("前回の失敗"))).ok();
        let before = session.clone();

        for text in ["", "   ", "\n\t "] {
            assert!(matches!(session.begin_submission(text), Err(Error::EmptyInput)));
        }
        assert_eq!(session, before);
    }

    #[test]
    fn test_begin_enters_loading_and_clears() {
        let mut session = Session::new();
        session.finish_submission(Ok(result("A", 50.0))).unwrap();
        session.finish_submission(Err(server_error("x"))).ok();

        let request = session.begin_submission("  候補者テキスト ").expect("開始失敗");
        assert_eq!(request.candidate_text, "  候補者テキスト ");
        assert!(session.is_loading());
        assert!(session.error().is_none());
        assert!(session.active_result().is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_begin_rejects_while_loading() {
        let mut session = Session::new();
        session.begin_submission("one").unwrap();
        assert!(matches!(session.begin_submission("two"), Err(Error::Busy)));
        assert!(session.is_loading());
    }

    #[test]
    fn test_finish_success_prepends_and_selects() {
        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        let first = session.finish_submission(Ok(result("A", 10.0))).unwrap();
        session.begin_submission("b").unwrap();
        let second = session.finish_submission(Ok(result("B", 20.0))).unwrap();

        assert!(!session.is_loading());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().at(0).unwrap().id, second);
        assert_eq!(session.history().at(1).unwrap().id, first);
        assert_eq!(session.active_id(), Some(second));
        assert_eq!(session.active_result().unwrap().result.candidate_identifier(), Some("B"));
    }

    #[test]
    fn test_finish_failure_sets_error_only() {
        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        let err = session.finish_submission(Err(server_error("quota exceeded"))).unwrap_err();

        assert_eq!(err.user_message(), "quota exceeded");
        assert!(!session.is_loading());
        assert!(session.history().is_empty());
        assert_eq!(session.error().unwrap().message, "quota exceeded");
        assert!(session.active_display_result().is_none());
    }

    #[test]
    fn test_error_hides_display_result() {
        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        let id = session.finish_submission(Ok(result("A", 10.0))).unwrap();
        session.begin_submission("b").unwrap();
        session.finish_submission(Err(server_error("x"))).ok();

        // エラー後に以前の結果を選び直すとエラーは消える
        assert!(session.active_display_result().is_none());
        assert!(session.select(id));
        assert!(session.error().is_none());
        assert_eq!(session.active_display_result().unwrap().id, id);
    }

    #[test]
    fn test_select_while_loading_then_success_overrides() {
        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        let old = session.finish_submission(Ok(result("A", 10.0))).unwrap();

        session.begin_submission("b").unwrap();
        assert!(session.select(old));
        assert!(session.is_loading());
        assert_eq!(session.active_id(), Some(old));

        let new = session.finish_submission(Ok(result("B", 20.0))).unwrap();
        assert_eq!(session.active_id(), Some(new));
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut other = Session::new();
        other.begin_submission("x").unwrap();
        other.finish_submission(Ok(result("X", 1.0))).unwrap();
        other.begin_submission("y").unwrap();
        let foreign = other.finish_submission(Ok(result("Y", 2.0))).unwrap();

        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        let id = session.finish_submission(Ok(result("A", 1.0))).unwrap();

        assert!(!session.select(foreign));
        assert_eq!(session.active_id(), Some(id));
    }

    #[test]
    fn test_shape_error_message() {
        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        session
            .finish_submission(Err(ApiError::UnexpectedShape {
                payload: Some("{}".into()),
                server_error: None,
            }))
            .ok();

        let error = session.error().unwrap();
        assert_eq!(error.message, crate::error::UNEXPECTED_SHAPE_ERROR);
        assert_eq!(error.detail.as_deref(), Some("{}"));
    }

    #[test]
    fn test_abandon_leaves_loading() {
        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        session.abandon_submission();
        assert!(!session.is_loading());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_connectivity_set_once() {
        let mut session = Session::new();
        let ok = Connectivity::from_probe(&Ok(HealthStatus {
            status: Some("ok".into()),
            message: Some("Backend is running!".into()),
        }));
        assert!(session.set_connectivity(ok));
        assert!(session.connectivity.connected);
        assert_eq!(session.connectivity.message, "Backend is running!");

        let failed = Connectivity::from_probe(&Err(ApiError::Transport("down".into())));
        assert!(!session.set_connectivity(failed));
        assert!(session.connectivity.connected);
    }

    #[test]
    fn test_connectivity_messages() {
        let ok = Connectivity::from_probe(&Ok(HealthStatus::default()));
        assert_eq!(ok.message, CONNECTED_MESSAGE);
        assert!(!ok.is_checking());

        let failed = Connectivity::from_probe(&Err(ApiError::Transport("timeout".into())));
        assert!(!failed.connected);
        assert_eq!(failed.message, CONNECTION_FAILED_MESSAGE);
    }

    #[test]
    fn test_export_request_all_history() {
        let mut session = Session::new();
        assert!(matches!(
            session.export_request(ExportScope::AllHistory),
            Err(Error::NothingToExport)
        ));

        session.begin_submission("a").unwrap();
        let first = session.finish_submission(Ok(result("A", 1.0))).unwrap();
        session.begin_submission("b").unwrap();
        session.finish_submission(Ok(result("B", 2.0))).unwrap();
        session.select(first);
        session.export_format = ExportFormat::Markdown;

        let request = session.export_request(ExportScope::AllHistory).unwrap();
        assert_eq!(request.format, ExportFormat::Markdown);
        assert_eq!(request.results_list.len(), 2);
        assert_eq!(request.results_list[0].candidate_identifier(), Some("B"));
    }

    #[test]
    fn test_export_request_selected() {
        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        let first = session.finish_submission(Ok(result("A", 1.0))).unwrap();
        session.begin_submission("b").unwrap();
        session.finish_submission(Ok(result("B", 2.0))).unwrap();
        session.select(first);

        let request = session.export_request(ExportScope::Selected).unwrap();
        assert_eq!(request.results_list.len(), 1);
        assert_eq!(request.results_list[0].candidate_identifier(), Some("A"));
    }

    #[test]
    fn test_export_request_selected_without_selection() {
        let mut session = Session::new();
        session.begin_submission("a").unwrap();
        session.finish_submission(Ok(result("A", 1.0))).unwrap();
        session.begin_submission("b").unwrap();

        assert!(matches!(
            session.export_request(ExportScope::Selected),
            Err(Error::NothingToExport)
        ));
    }

    #[test]
    fn test_restore_history_keeps_order() {
        let mut session = Session::new();
        let count = session.restore_history(vec![result("B", 2.0), result("A", 1.0)]);

        assert_eq!(count, 2);
        assert_eq!(session.history().display_label(0), "B");
        assert_eq!(session.history().display_label(1), "A");
        assert_eq!(session.active_result().unwrap().result.candidate_identifier(), Some("B"));
    }

    #[test]
    fn test_refcell_store() {
        let store = Rc::new(RefCell::new(Session::new()));
        let loading = store.update(|s| {
            s.begin_submission("a").unwrap();
            s.is_loading()
        });
        assert_eq!(loading, Some(true));
        assert_eq!(store.with(|s| s.is_loading()), Some(true));
    }
}
