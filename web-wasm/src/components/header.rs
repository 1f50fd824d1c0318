//! ヘッダーコンポーネント

use candidate_eval_common::Connectivity;
use leptos::prelude::*;

#[component]
pub fn Header(connectivity: Signal<Connectivity>) -> impl IntoView {
    let badge_class = move || {
        let status = connectivity.get();
        if status.is_checking() {
            "status-badge checking"
        } else if status.connected {
            "status-badge connected"
        } else {
            "status-badge disconnected"
        }
    };

    view! {
        <header class="header">
            <h1>"候補者評価ツール"</h1>
            <span class=badge_class>
                {move || connectivity.get().message}
            </span>
        </header>
    }
}
