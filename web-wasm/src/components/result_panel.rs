//! 評価結果パネルコンポーネント
//!
//! エラーと結果は同時に表示しない。解析中に履歴を選んだ場合は
//! 解析中の表示に加えて選んだ結果を出す。

use crate::components::progress_bar::ProgressBar;
use candidate_eval_common::display::{Scorecard, ScorecardSection};
use candidate_eval_common::ErrorState;
use leptos::prelude::*;

#[component]
pub fn ResultPanel(
    is_loading: Signal<bool>,
    error: Signal<Option<ErrorState>>,
    scorecard: Signal<Option<Scorecard>>,
) -> impl IntoView {
    view! {
        <div class="result-panel">
            <Show when=move || is_loading.get()>
                <p class="loading">"解析中..."</p>
            </Show>
            {move || {
                if let Some(err) = error.get() {
                    view! { <ErrorView error=err /> }.into_any()
                } else if let Some(card) = scorecard.get() {
                    view! { <ScorecardView card=card /> }.into_any()
                } else if is_loading.get() {
                    ().into_any()
                } else {
                    view! { <p class="text-muted">"候補者情報を入力して評価してください"</p> }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn ErrorView(error: ErrorState) -> impl IntoView {
    view! {
        <div class="error-box">
            <p class="error-message">{error.message}</p>
            {error.detail.map(|detail| view! {
                <details>
                    <summary>"詳細"</summary>
                    <pre>{detail}</pre>
                </details>
            })}
        </div>
    }
}

#[component]
fn ScorecardView(card: Scorecard) -> impl IntoView {
    let has_details = card.has_details();

    view! {
        <div class="scorecard">
            <h2>{card.candidate}</h2>
            <ProgressBar width=card.progress_width text=format!("マッチ度: {}", card.percentage_text) />

            <ul class="category-scores">
                {card
                    .category_scores
                    .into_iter()
                    .map(|(label, score)| view! { <li>{format!("{}: {:.1}", label, score)}</li> })
                    .collect_view()}
            </ul>

            {if has_details {
                card.sections.into_iter().map(section_view).collect_view().into_any()
            } else {
                view! { <p class="text-muted">"評価詳細はありません"</p> }.into_any()
            }}

            {card.overall_comment.map(|comment| view! {
                <div class="overall-comment">
                    <h3>"総評"</h3>
                    <p>{comment}</p>
                </div>
            })}
        </div>
    }
}

fn section_view(section: ScorecardSection) -> impl IntoView {
    view! {
        <section class="rating-section">
            <h3>{section.label}</h3>
            <table class="rating-table">
                <tbody>
                    {section
                        .rows
                        .into_iter()
                        .map(|row| view! {
                            <tr class=row.display.css_class>
                                <td class="rating-icon" title=row.display.label>{row.display.icon}</td>
                                <td class="rating-symbol">{row.symbol}</td>
                                <td class="rating-item">{row.label}</td>
                                <td class="rating-reason">{row.reason}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </section>
    }
}
