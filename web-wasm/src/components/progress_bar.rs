//! マッチ度バーコンポーネント

use leptos::prelude::*;

/// `width` は 0〜100 にクランプ済みの値
#[component]
pub fn ProgressBar(width: f64, text: String) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=format!("width: {}%", width)
                />
            </div>
            <p class="progress-text">{text}</p>
        </div>
    }
}
