//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::Request,
};
use tempfile::TempDir;

use promptdesk::api::{AppState, SharedState, app};
use promptdesk::core::AppConfig;
use promptdesk::llm::{CompletionProvider, SharedProvider};

pub const BOUNDARY: &str = "promptdesk-test-boundary";

/// A model server that answers from memory and remembers what it
/// was asked.
pub struct FakeProvider {
    models: Option<Vec<String>>,
    stall_listing: bool,
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    /// Reachable, with two models, echoing a fixed reply
    pub fn replying(reply: &str) -> Self {
        Self {
            models: Some(vec!["llama3:latest".to_string(), "mistral".to_string()]),
            stall_listing: false,
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    /// Lists models but every chat fails
    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            ..Self::replying("")
        }
    }

    /// Nothing listening
    pub fn unreachable() -> Self {
        Self {
            models: None,
            reply: Err("connection refused".to_string()),
            ..Self::replying("")
        }
    }

    /// Accepts the request but never answers the model listing
    pub fn stalled() -> Self {
        Self {
            stall_listing: true,
            ..Self::replying("ok")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        if self.stall_listing {
            std::future::pending::<()>().await;
        }
        self.models
            .clone()
            .ok_or_else(|| anyhow!("Failed to connect to fake model server"))
    }

    async fn chat(&self, _model: &str, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(|e| anyhow!(e))
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: SharedState,
    pub provider: Arc<FakeProvider>,
    pub config: AppConfig,
    // Removed from disk when the test ends
    pub dir: TempDir,
}

/// Creates a test application backed by `provider` with all files
/// kept in a temporary directory.
pub fn test_app(provider: FakeProvider) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = AppConfig::with_storage_path(dir.path().to_str().unwrap(), "http://127.0.0.1:9");
    let provider = Arc::new(provider);
    let shared: SharedProvider = provider.clone();
    let state = Arc::new(RwLock::new(AppState::new(shared, config.clone())));

    TestApp {
        router: app(Arc::clone(&state)),
        state,
        provider,
        config,
        dir,
    }
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Build a multipart/form-data body the way a browser submits the
/// query form.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str)>) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        ));
    }
    if let Some((file_name, contents)) = file {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"inputFile\"; filename=\"{}\"\r\nContent-Type: text/plain\r\n\r\n{}\r\n",
            BOUNDARY, file_name, contents
        ));
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body
}

pub fn query_request(fields: &[(&str, &str)], file: Option<(&str, &str)>) -> Request<Body> {
    Request::builder()
        .uri("/query")
        .method("POST")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(fields, file)))
        .unwrap()
}
