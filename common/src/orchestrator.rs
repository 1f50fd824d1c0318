//! 評価・エクスポートの実行フロー（CLI/WASM共通）
//!
//! セッション状態の更新は `Session` のメソッドに任せ、ここでは
//! 「状態を進める → バックエンドを待つ → 結果を反映する」の順序だけを持つ。
//! await 中はセッションを借用しないので、その間も履歴の選択などは行える。

use crate::backend::EvaluationBackend;
use crate::error::{Error, Result};
use crate::export::{derive_filename, DownloadFile, ExportScope};
use crate::history::EntryId;
use crate::session::{Connectivity, Session, SessionStore};
use tracing::{debug, info, warn};

/// 解析中フラグを必ず戻すためのガード
///
/// 完了前に Future が破棄された（パニック・キャンセル）場合でも
/// Loading のまま残らないようにする。
struct LoadingGuard<'a, S: SessionStore + ?Sized> {
    store: &'a S,
    armed: bool,
}

impl<'a, S: SessionStore + ?Sized> LoadingGuard<'a, S> {
    fn new(store: &'a S) -> Self {
        Self { store, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: SessionStore + ?Sized> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            warn!("評価リクエストが完了前に破棄されました");
            self.store.update(|s| s.abandon_submission());
        }
    }
}

/// 候補者テキストを評価して履歴に追加
///
/// # Arguments
/// * `backend` - 評価バックエンド
/// * `store` - セッション状態
/// * `text` - 候補者情報（前後の空白のみの場合は通信せずにエラー）
///
/// # Returns
/// * `Ok(EntryId)` - 追加された履歴エントリ（選択済み）
/// * `Err` - 入力エラー、または通信・サーバー・応答形式エラー（セッションにも記録済み）
pub async fn submit_evaluation<B, S>(backend: &B, store: &S, text: &str) -> Result<EntryId>
where
    B: EvaluationBackend + ?Sized,
    S: SessionStore + ?Sized,
{
    let request = store
        .update(|s| s.begin_submission(text))
        .ok_or(Error::SessionClosed)??;

    info!(chars = request.candidate_text.chars().count(), "評価リクエスト送信");

    let guard = LoadingGuard::new(store);
    let outcome = backend.evaluate(&request).await;
    guard.disarm();

    match &outcome {
        Ok(result) => info!(
            candidate = result.candidate_identifier().unwrap_or("-"),
            score = ?result.total_match_percentage(),
            "評価完了"
        ),
        Err(e) => warn!(error = %e, "評価失敗"),
    }

    let settled = store
        .update(|s| s.finish_submission(outcome))
        .ok_or(Error::SessionClosed)?;

    Ok(settled?)
}

/// 履歴から結果を選択（通信なし）
///
/// 履歴にないIDの場合は何もしないで `false` を返す。
pub fn select_from_history<S>(store: &S, id: EntryId) -> Result<bool>
where
    S: SessionStore + ?Sized,
{
    let selected = store.update(|s| s.select(id)).ok_or(Error::SessionClosed)?;
    debug!(%id, selected, "履歴選択");
    Ok(selected)
}

/// 評価結果をエクスポート
///
/// 対象が空なら通信せずに `Error::NothingToExport`。
/// エクスポートはセッション状態（解析中フラグ・エラー表示）を変更しない。
pub async fn export_results<B, S>(backend: &B, store: &S, scope: ExportScope) -> Result<DownloadFile>
where
    B: EvaluationBackend + ?Sized,
    S: SessionStore + ?Sized,
{
    let request = store
        .with(|s| s.export_request(scope))
        .ok_or(Error::SessionClosed)??;

    let format = request.format;
    info!(count = request.results_list.len(), %format, ?scope, "エクスポート開始");

    let payload = backend.export(&request).await.map_err(|e| {
        warn!(error = %e, "エクスポート失敗");
        e
    })?;

    let filename = derive_filename(payload.content_disposition.as_deref(), format);
    let content_type = payload
        .content_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format.mime_type().to_string());

    info!(%filename, bytes = payload.bytes.len(), "エクスポート完了");

    Ok(DownloadFile {
        filename,
        content_type,
        bytes: payload.bytes,
    })
}

/// 起動時の接続確認（1回のみ・再試行なし）
///
/// 失敗してもエラーにはせず、接続状態として記録する。
pub async fn probe_connectivity<B, S>(backend: &B, store: &S) -> Connectivity
where
    B: EvaluationBackend + ?Sized,
    S: SessionStore + ?Sized,
{
    let result = backend.health().await;
    if let Err(e) = &result {
        warn!(error = %e, "ヘルスチェック失敗");
    }

    let connectivity = Connectivity::from_probe(&result);
    store.update(|s: &mut Session| s.set_connectivity(connectivity.clone()));
    connectivity
}
