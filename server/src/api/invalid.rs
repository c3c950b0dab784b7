use axum::{
    body::Body,
    http::{Method, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const MESSAGE: &str = "endpoint inválido";

#[derive(Debug, Serialize)]
pub struct ResponseBody {
    pub erro: &'static str,
}

/// Answers any unknown path. The status stays `200`.
#[tracing::instrument(ret)]
pub async fn handler(uri: Uri) -> ResponseBody {
    tracing::info!("unknown endpoint");
    ResponseBody { erro: MESSAGE }
}

/// Only a bare `GET <path>` can reach an endpoint. Any other method, and
/// any request target carrying a query (even an empty `?`), is unknown.
pub async fn mw_only_bare_get(request: Request<Body>, next: Next) -> Response {
    if request.method() != Method::GET || request.uri().query().is_some() {
        return handler(request.uri().clone()).await.into_response();
    }

    next.run(request).await
}

impl IntoResponse for ResponseBody {
    fn into_response(self) -> axum::response::Response {
        super::json_response(&self)
    }
}
