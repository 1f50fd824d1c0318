//! 対話モード
//!
//! Web画面と同じ操作（評価・履歴選択・エクスポート・形式切替）を
//! ターミナルで行う。状態は1回の対話の間だけ保持する。

use crate::download::save_download;
use crate::error::Result;
use crate::render;
use candidate_eval_common::display::Scorecard;
use candidate_eval_common::{
    export_results, probe_connectivity, select_from_history, submit_evaluation, Error,
    EvaluationBackend, ExportFormat, ExportScope, Session,
};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Evaluate,
    History,
    ExportAll,
    ExportSelected,
    SwitchFormat,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::Evaluate,
        MenuAction::History,
        MenuAction::ExportAll,
        MenuAction::ExportSelected,
        MenuAction::SwitchFormat,
        MenuAction::Quit,
    ];

    pub fn label(&self, format: ExportFormat) -> String {
        match self {
            MenuAction::Evaluate => "候補者を評価".to_string(),
            MenuAction::History => "履歴から選択".to_string(),
            MenuAction::ExportAll => format!("全履歴をエクスポート ({})", format.label()),
            MenuAction::ExportSelected => format!("選択中の結果をエクスポート ({})", format.label()),
            MenuAction::SwitchFormat => "出力形式を切替 (CSV/Markdown)".to_string(),
            MenuAction::Quit => "終了".to_string(),
        }
    }
}

/// 形式の切替
pub fn toggle_format(format: ExportFormat) -> ExportFormat {
    match format {
        ExportFormat::Csv => ExportFormat::Markdown,
        ExportFormat::Markdown => ExportFormat::Csv,
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 対話ループ
pub async fn run_session<B: EvaluationBackend>(
    backend: &B,
    default_format: ExportFormat,
    output_dir: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let store = RefCell::new(Session::new());
    store.borrow_mut().export_format = default_format;

    println!("🧑‍💼 candidate-eval - 対話モード\n");

    let pb = spinner("接続確認中...");
    let status = probe_connectivity(backend, &store).await;
    pb.finish_and_clear();
    println!("{}\n", render::connectivity(&status));

    loop {
        let format = store.borrow().export_format;
        let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.label(format)).collect();

        let index = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuAction::ALL[index] {
            MenuAction::Evaluate => {
                let text: String = Input::new()
                    .with_prompt("候補者情報")
                    .allow_empty(true)
                    .interact_text()?;
                store.borrow_mut().input_text = text.clone();

                let pb = spinner("解析中...");
                let outcome = submit_evaluation(backend, &store, &text).await;
                pb.finish_and_clear();

                match outcome {
                    Ok(_) => {
                        let session = store.borrow();
                        if let Some(entry) = session.active_display_result() {
                            println!("\n{}", render::scorecard(&Scorecard::from_entry(entry)));
                        }
                    }
                    Err(Error::Api(_)) => {
                        if let Some(state) = store.borrow().error() {
                            println!("{}\n", render::error(state, verbose));
                        }
                    }
                    Err(e) => println!("{}\n", e),
                }
            }

            MenuAction::History => {
                let session = store.borrow();
                if session.history().is_empty() {
                    println!("履歴はまだありません\n");
                    continue;
                }

                let items: Vec<String> = (0..session.history().len())
                    .map(|i| session.history().display_label(i))
                    .collect();
                let default = session
                    .active_id()
                    .and_then(|id| session.history().position(id))
                    .unwrap_or(0);
                let ids: Vec<_> = session.history().iter().map(|e| e.id).collect();
                drop(session);

                let picked = Select::new()
                    .with_prompt("履歴")
                    .items(&items)
                    .default(default)
                    .interact()?;

                select_from_history(&store, ids[picked])?;
                if let Some(entry) = store.borrow().active_display_result() {
                    println!("\n{}", render::scorecard(&Scorecard::from_entry(entry)));
                }
            }

            MenuAction::ExportAll | MenuAction::ExportSelected => {
                let scope = if MenuAction::ALL[index] == MenuAction::ExportAll {
                    ExportScope::AllHistory
                } else {
                    ExportScope::Selected
                };

                let pb = spinner("エクスポート中...");
                let outcome = export_results(backend, &store, scope).await;
                pb.finish_and_clear();

                match outcome {
                    Ok(file) => {
                        let path = save_download(&file, output_dir)?;
                        println!("✔ 保存しました: {}\n", path.display());
                    }
                    Err(Error::Api(e)) => println!("✕ {}\n", e.user_message()),
                    Err(e) => println!("{}\n", e),
                }
            }

            MenuAction::SwitchFormat => {
                let mut session = store.borrow_mut();
                let next = toggle_format(session.export_format);
                session.export_format = next;
                println!("出力形式: {}\n", session.export_format.label());
            }

            MenuAction::Quit => break,
        }
    }

    Ok(())
}
