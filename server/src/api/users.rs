use axum::{extract::State, response::IntoResponse};
use axum_macros::debug_handler;
use serde::Serialize;

use crate::AppState;

pub const PATH: &str = "/usuarios";

#[derive(Debug, Serialize)]
pub struct ResponseBody {
    pub usuarios_ativos: Vec<String>,
}

#[debug_handler]
#[tracing::instrument(skip_all, ret)]
pub async fn handler(State(AppState { runner, config, .. }): State<AppState>) -> ResponseBody {
    let output = runner.run(&config.users_command()).await;

    ResponseBody {
        usuarios_ativos: super::split_lines(&output),
    }
}

impl IntoResponse for ResponseBody {
    fn into_response(self) -> axum::response::Response {
        super::json_response(&self)
    }
}
