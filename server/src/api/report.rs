use axum::{extract::State, response::IntoResponse};
use axum_macros::debug_handler;
use serde::Serialize;

use crate::AppState;

pub const PATH: &str = "/relatorio";

#[derive(Debug, Serialize)]
pub struct ResponseBody {
    pub ultimos_eventos: Vec<String>,
}

#[debug_handler]
#[tracing::instrument(skip_all, fields(lines = config.report_lines), ret)]
pub async fn handler(State(AppState { runner, config, .. }): State<AppState>) -> ResponseBody {
    let output = runner.run(&config.report_command()).await;

    ResponseBody {
        ultimos_eventos: last_lines(&output, config.report_lines),
    }
}

fn last_lines(output: &str, n: usize) -> Vec<String> {
    let lines = super::split_lines(output);
    let skip = lines.len().saturating_sub(n);
    lines.into_iter().skip(skip).collect()
}

impl IntoResponse for ResponseBody {
    fn into_response(self) -> axum::response::Response {
        super::json_response(&self)
    }
}
