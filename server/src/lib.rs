pub mod api;
mod config;
mod runner;
mod span;

pub use config::StatusConfig;
pub use runner::{CommandRunner, ShellRunner};

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use error::Context;
use tokio::{net::TcpListener, sync::Semaphore};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

#[derive(Debug)]
pub struct ServerOpts {
    pub host: IpAddr,
    pub port: u16,
    pub status: StatusConfig,
    pub command_timeout: Option<Duration>,
    pub max_concurrent_requests: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<dyn CommandRunner>,
    pub config: Arc<StatusConfig>,
    pub in_flight: Arc<Semaphore>,
}

impl AppState {
    /// `max_concurrent_requests` is raised to 1 if given as 0.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        config: StatusConfig,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            runner,
            config: Arc::new(config),
            in_flight: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
        }
    }
}

pub fn server(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(from_fn(middleware::mw_client_ip))
        .layer(TraceLayer::new_for_http().make_span_with(span::span))
        .layer(from_fn(middleware::latency_ms))
        .layer(from_fn_with_state(
            Arc::clone(&state.in_flight),
            middleware::mw_concurrency_limit,
        ))
        .layer(from_fn(api::invalid::mw_only_bare_get));

    Router::new()
        .route(api::users::PATH, get(api::users::handler))
        .route(api::logins::PATH, get(api::logins::handler))
        .route(api::report::PATH, get(api::report::handler))
        .fallback(api::invalid::handler)
        .with_state(state)
        .layer(middleware)
}

/// Binds `host:port` and serves until the process is killed.
pub async fn serve(opts: ServerOpts) -> Result<(), ServerError> {
    tracing::info!("{:?}", opts);

    let addr = SocketAddr::new(opts.host, opts.port);
    let state = AppState::new(
        Arc::new(ShellRunner::new(opts.command_timeout)),
        opts.status,
        opts.max_concurrent_requests,
    );
    let app = server(state).into_make_service_with_connect_info::<SocketAddr>();

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind :: {addr}"))?;
    tracing::info!(
        "listening on http://{}",
        listener.local_addr().context("local_addr")?
    );
    axum::serve(listener, app)
        .await
        .context("axum::serve")
        .map_err(|e| e.into())
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Internal(#[from] error::InternalError),
}
