use candidate_eval::{cli, client, config, download, error, interactive, logging, render, results_file};
use candidate_eval_common::display::Scorecard;
use candidate_eval_common::{
    export_results, probe_connectivity, select_from_history, submit_evaluation, ExportScope,
    Session, SessionStore,
};
use clap::Parser;
use cli::{Cli, Commands};
use client::HttpBackend;
use config::Config;
use error::{CandidateEvalError, Result};
use std::cell::RefCell;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let mut config = Config::load()?;
    let api_base = config.resolve_api_base(cli.api_url.as_deref());
    let endpoints = config.endpoints(&api_base, cli.health_url.as_deref());
    debug!(?endpoints, "API設定");

    match cli.command {
        Commands::Evaluate { text, file, json, save } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => {
                    if !path.exists() {
                        return Err(CandidateEvalError::FileNotFound(path.display().to_string()));
                    }
                    std::fs::read_to_string(&path)?
                }
                (None, None) => return Err(CandidateEvalError::MissingInput),
            };

            let backend = HttpBackend::new(endpoints, config.timeout_seconds)?;
            let store = RefCell::new(Session::new());

            if !json {
                println!("🔍 candidate-eval - 評価\n");
                println!("解析中...");
            }

            if let Err(e) = submit_evaluation(&backend, &store, &text).await {
                if let Some(state) = store.borrow().error() {
                    eprintln!("{}", render::error(state, cli.verbose));
                }
                return Err(e.into());
            }

            let session = store.borrow();
            let Some(entry) = session.active_display_result() else {
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entry.result)?);
            } else {
                println!("{}", render::scorecard(&Scorecard::from_entry(entry)));
            }

            if let Some(path) = save {
                let count = results_file::prepend_result(&path, &entry.result)?;
                if !json {
                    println!("✔ 履歴に追加: {} ({}件)", path.display(), count);
                }
            }
        }

        Commands::Export { input, format, output, selected } => {
            println!("📄 candidate-eval - エクスポート\n");

            let results = results_file::load_results(&input)?;
            let store = RefCell::new(Session::new());
            store.update(|s| {
                s.restore_history(results);
                s.export_format = format.unwrap_or(config.default_format);
            });

            let scope = match selected {
                Some(position) => {
                    let (id, len) = store
                        .with(|s| {
                            let id = position
                                .checked_sub(1)
                                .and_then(|i| s.history().at(i))
                                .map(|e| e.id);
                            (id, s.history().len())
                        })
                        .unwrap_or((None, 0));
                    let id = id.ok_or(CandidateEvalError::NoSuchEntry { index: position, len })?;
                    select_from_history(&store, id)?;
                    ExportScope::Selected
                }
                None => ExportScope::AllHistory,
            };

            let backend = HttpBackend::new(endpoints, config.timeout_seconds)?;
            let file = export_results(&backend, &store, scope).await?;
            let path = download::save_download(&file, output.as_deref())?;

            println!("✔ 保存しました: {}", path.display());
            println!("\n✅ エクスポート完了");
        }

        Commands::Health => {
            let backend = HttpBackend::new(endpoints, config.timeout_seconds)?;
            let store = RefCell::new(Session::new());
            let status = probe_connectivity(&backend, &store).await;

            println!(
                "{} ({})",
                render::connectivity(&status),
                backend.endpoints().health
            );
        }

        Commands::Session { output } => {
            let backend = HttpBackend::new(endpoints, config.timeout_seconds)?;
            interactive::run_session(&backend, config.default_format, output.as_deref(), cli.verbose)
                .await?;
        }

        Commands::Config { set_api_url, show } => {
            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
                println!("✔ APIのURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  APIベース: {}", config.api_base);
                println!("  使用中のAPIベース: {}", api_base);
                println!(
                    "  ヘルスチェック: {}",
                    config.health_url.as_deref().unwrap_or("(APIのオリジン直下)")
                );
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  既定の出力形式: {}", config.default_format.label());
            }
        }
    }

    Ok(())
}
