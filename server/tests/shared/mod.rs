use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use http::{Request, Response};
use server::{AppState, CommandRunner, StatusConfig};
use tower::ServiceExt;

pub mod macros;

/// Answers with canned text for the first registered pattern contained in
/// the command, and with nothing otherwise.
#[derive(Default)]
pub struct FakeRunner {
    outputs: Vec<(&'static str, String)>,
    commands: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn with(mut self, pattern: &'static str, output: impl Into<String>) -> Self {
        self.outputs.push((pattern, output.into()));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, command: &str) -> String {
        self.commands.lock().unwrap().push(command.to_owned());
        self.outputs
            .iter()
            .find(|(pattern, _)| command.contains(pattern))
            .map(|(_, output)| output.clone())
            .unwrap_or_default()
    }
}

pub struct TestClient {
    runner: Arc<FakeRunner>,
    config: StatusConfig,
}

impl TestClient {
    pub fn new(runner: FakeRunner) -> Self {
        Self::with_config(runner, StatusConfig::default())
    }

    pub fn with_config(runner: FakeRunner, config: StatusConfig) -> Self {
        Self {
            runner: Arc::new(runner),
            config,
        }
    }

    pub fn runner(&self) -> &FakeRunner {
        &self.runner
    }

    pub async fn send(&self, request: Request<Body>) -> Asserter {
        let state = AppState::new(self.runner.clone(), self.config.clone(), 1);
        let response = server::server(state)
            .oneshot(request)
            .await
            .unwrap(/* Infallible */);
        Asserter::from(response)
    }
}

pub struct Asserter {
    response: Response<Body>,
}

impl Asserter {
    pub fn status(self, expected: u16) -> Self {
        assert_eq!(
            self.response.status().as_u16(),
            expected,
            "expected status {}, got {}",
            expected,
            self.response.status()
        );
        self
    }

    pub fn header(self, name: &str, expected: &str) -> Self {
        let value = self
            .response
            .headers()
            .get(name)
            .unwrap_or_else(|| panic!("missing header `{name}`"));
        assert_eq!(value, expected, "unexpected `{name}` header");
        self
    }

    pub fn has_header(self, name: &str) -> Self {
        assert!(
            self.response.headers().contains_key(name),
            "missing header `{name}`"
        );
        self
    }

    pub async fn json_body(self, f: impl FnOnce(serde_json::Value)) {
        f(self.into_json_body().await)
    }

    pub async fn into_json_body(self) -> serde_json::Value {
        let body_bytes = to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body");

        serde_json::from_slice(&body_bytes).expect("unable to deserialize response body")
    }

    pub async fn into_text_body(self) -> String {
        let body_bytes = to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body");

        String::from_utf8(body_bytes.to_vec()).expect("response body is not utf-8")
    }
}

impl From<Response<Body>> for Asserter {
    fn from(response: Response<Body>) -> Self {
        Self { response }
    }
}

static TRACING_INIT: std::sync::Once = std::sync::Once::new();

pub fn tracing_init() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
