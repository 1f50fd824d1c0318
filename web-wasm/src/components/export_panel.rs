//! エクスポートパネルコンポーネント

use candidate_eval_common::{ExportFormat, ExportScope};
use leptos::prelude::*;

#[component]
pub fn ExportPanel<FF, FE>(
    format: Signal<ExportFormat>,
    has_history: Signal<bool>,
    has_selection: Signal<bool>,
    on_format_change: FF,
    on_export: FE,
) -> impl IntoView
where
    FF: Fn(ExportFormat) + 'static + Clone + Send,
    FE: Fn(ExportScope) + 'static + Clone + Send,
{
    let format_option = move |value: ExportFormat| {
        let on_format_change = on_format_change.clone();
        view! {
            <label class="format-option">
                <input
                    type="radio"
                    name="export-format"
                    prop:checked=move || format.get() == value
                    on:change=move |_| on_format_change(value)
                />
                {value.label()}
            </label>
        }
    };

    view! {
        <div class="export-panel">
            <div class="format-select">
                {format_option(ExportFormat::Csv)}
                {format_option(ExportFormat::Markdown)}
            </div>

            <button
                class="btn btn-secondary"
                disabled=move || !has_history.get()
                on:click={
                    let on_export = on_export.clone();
                    move |_| on_export(ExportScope::AllHistory)
                }
            >
                "全履歴をエクスポート"
            </button>

            <button
                class="btn btn-tertiary"
                disabled=move || !has_selection.get()
                on:click={
                    let on_export = on_export.clone();
                    move |_| on_export(ExportScope::Selected)
                }
            >
                "選択中のみエクスポート"
            </button>
        </div>
    }
}
