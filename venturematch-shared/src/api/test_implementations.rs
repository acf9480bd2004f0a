//! Scripted transports for exercising the client without a backend.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ApiError, ApiRequest, ApiResponse, ApiResult, Transport};

/// Replays queued answers in order and records every request it receives.
///
/// Running out of answers is reported as a transport failure.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    answers: Mutex<VecDeque<ApiResult<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, answer: ApiResult<ApiResponse>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub fn push_raw(&self, status: StatusCode, body: &str) {
        self.push(Ok(ApiResponse::new(status, body)));
    }

    pub fn push_json<B: Serialize>(&self, status: StatusCode, body: &B) {
        self.push_raw(status, &serde_json::to_string(body).unwrap());
    }

    pub fn push_unreachable(&self) {
        self.push(Err(ApiError::transport("connection refused")));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no scripted answer left")))
    }
}
