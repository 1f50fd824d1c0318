//! ビルド時設定
//!
//! `API_BASE_URL` / `HEALTH_CHECK_URL` をビルド時の環境変数から読む。

use candidate_eval_common::{ApiEndpoints, DEFAULT_API_BASE};

pub fn api_endpoints() -> ApiEndpoints {
    endpoints_from(option_env!("API_BASE_URL"), option_env!("HEALTH_CHECK_URL"))
}

fn endpoints_from(api_base: Option<&str>, health: Option<&str>) -> ApiEndpoints {
    ApiEndpoints::new(api_base.unwrap_or(DEFAULT_API_BASE), health)
}
