use axum::{extract::State, response::IntoResponse};
use axum_macros::debug_handler;
use serde::Serialize;

use crate::AppState;

pub const PATH: &str = "/logins";

/// Peer addresses prefixed by their connection count, one per line,
/// exactly as `uniq -c` printed them.
#[derive(Debug, Serialize)]
pub struct ResponseBody {
    pub logins_ativos: String,
}

#[debug_handler]
#[tracing::instrument(skip_all, ret)]
pub async fn handler(State(AppState { runner, config, .. }): State<AppState>) -> ResponseBody {
    ResponseBody {
        logins_ativos: runner.run(&config.logins_command()).await,
    }
}

impl IntoResponse for ResponseBody {
    fn into_response(self) -> axum::response::Response {
        super::json_response(&self)
    }
}
