use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use tokio::sync::Semaphore;

/// Holds one permit of `permits` for the whole lifetime of the request.
/// With a single permit requests are served strictly one after another.
pub async fn mw_concurrency_limit(
    State(permits): State<Arc<Semaphore>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let Ok(_permit) = permits.acquire().await else {
        tracing::error!("request semaphore closed");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    next.run(request).await
}
