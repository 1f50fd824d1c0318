//! Candidate Eval Common Library
//!
//! CLIとWeb(WASM)で共有される型と評価セッションのロジック

pub mod types;
pub mod error;
pub mod parser;
pub mod history;
pub mod session;
pub mod backend;
pub mod endpoints;
pub mod export;
pub mod display;
pub mod orchestrator;

pub use types::{CalculatedScores, EvaluationResult, GeminiEvaluation, Rating, RatingGrid, RatingItem};
pub use error::{ApiError, Error, Result};
pub use parser::{
    evaluate_error, evaluate_error_message, export_error, export_error_message,
    parse_evaluate_response, parse_health_response,
};
pub use history::{EntryId, History, HistoryEntry};
pub use session::{Connectivity, ErrorState, Session, SessionStore};
pub use backend::{EvaluateRequest, EvaluationBackend, ExportPayload, ExportRequest, HealthStatus};
pub use endpoints::{health_check_url, ApiEndpoints, DEFAULT_API_BASE};
pub use export::{derive_filename, filename_from_content_disposition, DownloadFile, ExportFormat, ExportScope};
pub use display::{RatingDisplay, Scorecard};
pub use orchestrator::{export_results, probe_connectivity, select_from_history, submit_evaluation};
