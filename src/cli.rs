use candidate_eval_common::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "candidate-eval")]
#[command(about = "候補者評価クライアント（評価・履歴・エクスポート）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// ヘルスチェックURL（省略時はAPIのオリジン直下）
    #[arg(long, global = true)]
    pub health_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 候補者情報を1件評価
    Evaluate {
        /// 候補者情報（省略時は --file）
        text: Option<String>,

        /// 候補者情報を読み込むテキストファイル
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 結果をJSONのまま出力
        #[arg(long)]
        json: bool,

        /// 結果を履歴ファイルに追記
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// 保存した評価結果をCSV/Markdownに出力
    Export {
        /// 履歴JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (csv/md)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// 出力ファイル/ディレクトリ（省略時はカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// この番号（1始まり）の結果のみ出力
        #[arg(long)]
        selected: Option<usize>,
    },

    /// バックエンドの接続確認
    Health,

    /// 対話モード（評価・履歴選択・エクスポート）
    Session {
        /// エクスポート先ディレクトリ（省略時はカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::parse_from(["candidate-eval", "evaluate", "Jane Doe", "--json"]);
        match cli.command {
            Commands::Evaluate { text, json, file, .. } => {
                assert_eq!(text.as_deref(), Some("Jane Doe"));
                assert!(json);
                assert!(file.is_none());
            }
            _ => panic!("evaluate として解析されていない"),
        }
    }

    #[test]
    fn test_parse_export_format() {
        let cli = Cli::parse_from([
            "candidate-eval", "--api-url", "http://x/api", "export", "h.json", "-f", "md", "--selected", "2",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
        match cli.command {
            Commands::Export { format, selected, .. } => {
                assert_eq!(format, Some(ExportFormat::Markdown));
                assert_eq!(selected, Some(2));
            }
            _ => panic!("export として解析されていない"),
        }
    }

    #[test]
    fn test_parse_export_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["candidate-eval", "export", "h.json", "-f", "pdf"]).is_err());
    }
}
