//! Shared test helpers: a scripted, recording backend

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use teenyurl_web::backend::{ApiRequest, ApiResponse, BackendApi, BackendError};
use teenyurl_web::config::SessionConfig;
use teenyurl_web::handlers::AppState;
use teenyurl_web::session::SessionStore;

pub const FAKE_BASE_URL: &str = "http://fake-backend";

/// Backend that replays queued responses and records every request.
///
/// When the queue runs dry it answers 500, so a test that triggers an
/// unexpected call fails loudly instead of hanging.
#[derive(Default)]
pub struct FakeBackend {
    responses: Mutex<VecDeque<Result<ApiResponse, BackendError>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, response: ApiResponse) -> &Self {
        self.responses.lock().push_back(Ok(response));
        self
    }

    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.respond(ApiResponse::new(status, body))
    }

    pub fn fail(&self, error: BackendError) -> &Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> ApiRequest {
        self.calls
            .lock()
            .last()
            .cloned()
            .expect("no backend call was made")
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, BackendError> {
        self.calls.lock().push(request);
        self.responses.lock().pop_front().unwrap_or_else(|| {
            Ok(ApiResponse::new(
                500,
                json!({"message": "no scripted response"}),
            ))
        })
    }

    fn base_url(&self) -> &str {
        FAKE_BASE_URL
    }
}

pub fn app_state(backend: &Arc<FakeBackend>) -> AppState {
    AppState::new(backend.clone(), SessionStore::new(&SessionConfig::default()))
}

pub fn link_json(id: i64, code: &str) -> Value {
    json!({
        "id": id,
        "original_url": format!("https://example.com/{}", id),
        "short_url": format!("localhost:8080/{}", code),
        "created_at": "2024-05-01T10:00:00Z",
        "clicks": id * 2,
        "is_enabled": true
    })
}
