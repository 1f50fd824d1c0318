//! メインアプリケーションコンポーネント

use crate::api::FetchBackend;
use crate::components::{
    candidate_input::CandidateInput,
    export_panel::ExportPanel,
    header::Header,
    history_list::{history_rows, HistoryList},
    result_panel::ResultPanel,
};
use crate::config::api_endpoints;
use crate::export::trigger_download;
use crate::store::SignalStore;
use candidate_eval_common::display::Scorecard;
use candidate_eval_common::{
    export_results, probe_connectivity, select_from_history, submit_evaluation, EntryId, Error,
    ExportFormat, ExportScope, Session,
};
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn alert(message: &str) {
    gloo::dialogs::alert(message);
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let session = RwSignal::new(Session::new());
    let store = SignalStore(session);
    let backend = FetchBackend::new(api_endpoints());

    // 起動時に1回だけ接続確認
    {
        let backend = backend.clone();
        spawn_local(async move {
            let status = probe_connectivity(&backend, &store).await;
            log!("接続確認: {}", status.message);
        });
    }

    // 派生状態
    let connectivity = Signal::derive(move || session.with(|s| s.connectivity.clone()));
    let input_text = Signal::derive(move || session.with(|s| s.input_text.clone()));
    let is_loading = Signal::derive(move || session.with(|s| s.is_loading()));
    let error = Signal::derive(move || session.with(|s| s.error().cloned()));
    let scorecard = Signal::derive(move || {
        session.with(|s| s.active_display_result().map(Scorecard::from_entry))
    });
    let rows = Signal::derive(move || session.with(history_rows));
    let export_format = Signal::derive(move || session.with(|s| s.export_format));
    let has_history = Signal::derive(move || session.with(|s| !s.history().is_empty()));
    let has_selection = Signal::derive(move || session.with(|s| s.active_result().is_some()));

    // 入力ハンドラ
    let on_input = move |text: String| {
        session.update(|s| s.input_text = text);
    };

    // 評価ハンドラ
    let on_submit = {
        let backend = backend.clone();
        move |text: String| {
            let backend = backend.clone();
            spawn_local(async move {
                match submit_evaluation(&backend, &store, &text).await {
                    Ok(id) => log!("評価完了: {}", id),
                    // 結果パネルに表示済み
                    Err(Error::Api(e)) => warn!("評価失敗: {}", e),
                    Err(Error::EmptyInput) => alert(&Error::EmptyInput.to_string()),
                    Err(e) => warn!("評価を開始できません: {}", e),
                }
            });
        }
    };

    // 履歴選択ハンドラ
    let on_select = move |id: EntryId| {
        if let Err(e) = select_from_history(&store, id) {
            warn!("履歴選択失敗: {}", e);
        }
    };

    // 形式切替ハンドラ
    let on_format_change = move |format: ExportFormat| {
        session.update(|s| s.export_format = format);
    };

    // エクスポートハンドラ
    let on_export = {
        let backend = backend.clone();
        move |scope: ExportScope| {
            let backend = backend.clone();
            spawn_local(async move {
                match export_results(&backend, &store, scope).await {
                    Ok(file) => {
                        if let Err(e) = trigger_download(&file) {
                            alert(&format!("ダウンロードに失敗しました: {}", e));
                        }
                    }
                    Err(Error::Api(e)) => alert(&format!("エクスポートエラー: {}", e.user_message())),
                    Err(e) => alert(&e.to_string()),
                }
            });
        }
    };

    view! {
        <div class="container">
            <Header connectivity=connectivity />

            <div class="main-layout">
                <div class="input-column">
                    <CandidateInput
                        input_text=input_text
                        is_loading=is_loading
                        on_input=on_input
                        on_submit=on_submit
                    />

                    <HistoryList rows=rows on_select=on_select />

                    <ExportPanel
                        format=export_format
                        has_history=has_history
                        has_selection=has_selection
                        on_format_change=on_format_change
                        on_export=on_export
                    />
                </div>

                <div class="result-column">
                    <ResultPanel is_loading=is_loading error=error scorecard=scorecard />
                </div>
            </div>
        </div>
    }
}
