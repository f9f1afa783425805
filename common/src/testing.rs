//! テスト用のモッククライアント

use crate::error::{Error, Result};
use crate::transport::{ApiRequest, ApiResponse, HttpClient};
use crate::types::NormalizedImage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// 受け取ったリクエストを記録し、用意したレスポンスを順に返す
#[derive(Clone, Default)]
pub struct MockClient {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<ApiResponse>>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: ApiResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, error: Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpClient for MockClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("no mock response queued".to_string())))
    }
}

pub fn json_response(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: body.as_bytes().to_vec(),
    }
}

pub fn sample_image(filename: &str) -> NormalizedImage {
    NormalizedImage {
        bytes: vec![0xff, 0xd8, 0xff, 0xe0],
        mime_type: "image/jpeg".to_string(),
        filename: filename.to_string(),
    }
}
