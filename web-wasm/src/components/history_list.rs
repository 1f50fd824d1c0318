//! 評価履歴コンポーネント

use candidate_eval_common::display::format_percentage;
use candidate_eval_common::{EntryId, Session};
use leptos::prelude::*;

/// 履歴一覧の1行
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub id: EntryId,
    pub label: String,
    pub percentage_text: String,
    pub active: bool,
}

/// セッションから一覧表示用の行を作る（新しい順）
pub fn history_rows(session: &Session) -> Vec<HistoryRow> {
    let history = session.history();
    let active = session.active_id();

    history
        .iter()
        .enumerate()
        .map(|(i, entry)| HistoryRow {
            id: entry.id,
            label: history.display_label(i),
            percentage_text: format_percentage(entry.result.total_match_percentage()),
            active: Some(entry.id) == active,
        })
        .collect()
}

#[component]
pub fn HistoryList<FS>(rows: Signal<Vec<HistoryRow>>, on_select: FS) -> impl IntoView
where
    FS: Fn(EntryId) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="history-list">
            <h2>"評価履歴"</h2>
            <Show
                when=move || !rows.get().is_empty()
                fallback=|| view! { <p class="text-muted">"まだ評価結果はありません"</p> }
            >
                <ul>
                    <For
                        each=move || rows.get()
                        key=|row| (row.id, row.active)
                        children={
                            let on_select = on_select.clone();
                            move |row| {
                                let on_select = on_select.clone();
                                let id = row.id;
                                view! {
                                    <li
                                        class=if row.active { "history-item active" } else { "history-item" }
                                        on:click=move |_| on_select(id)
                                    >
                                        <span class="history-label">{row.label}</span>
                                        <span class="history-score">{row.percentage_text}</span>
                                    </li>
                                }
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
