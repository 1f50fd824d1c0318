//! 候補者情報入力コンポーネント

use leptos::prelude::*;

#[component]
pub fn CandidateInput<FI, FS>(
    input_text: Signal<String>,
    is_loading: Signal<bool>,
    on_input: FI,
    on_submit: FS,
) -> impl IntoView
where
    FI: Fn(String) + 'static + Clone + Send,
    FS: Fn(String) + 'static + Clone + Send,
{
    view! {
        <div class="candidate-input">
            <label for="candidate-text">"候補者情報"</label>
            <textarea
                id="candidate-text"
                rows="10"
                placeholder="履歴書・職務経歴などを貼り付けてください..."
                prop:value=move || input_text.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            <button
                class="btn btn-primary"
                disabled=move || is_loading.get()
                on:click=move |_| on_submit(input_text.get_untracked())
            >
                {move || if is_loading.get() { "解析中..." } else { "評価する" }}
            </button>
        </div>
    }
}
