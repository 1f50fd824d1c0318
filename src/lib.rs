//! candidate-eval: 候補者評価クライアント（CLI）

pub mod cli;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod render;
pub mod results_file;
