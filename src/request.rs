use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use storeadmin_shared::protocol::{HttpMethod, MultipartForm};

#[cfg(test)]
use futures::channel::oneshot;
#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// HTTP interface abstraction
// =========================================================

/// Wire body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    Empty,
    Text(String),
    /// Encoded by the transport, which also picks the boundary.
    Multipart(MultipartForm),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: HttpBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: HttpBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: HttpBody) -> Self {
        self.body = body;
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// An empty body reads as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            &self.body
        };
        serde_json::from_str(text).map_err(ApiError::Decode)
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations report only transport failures as errors; status
/// handling belongs to the caller.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// Test tools: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> (Status, Response Body)
    responses: RefCell<HashMap<String, (u16, String)>>,
    unreachable: RefCell<Vec<String>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            unreachable: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }

    pub fn mock_unreachable(&self, url: &str) {
        self.unreachable.borrow_mut().push(url.to_string());
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(req.clone());

        if self.unreachable.borrow().contains(&req.url) {
            return Err(ApiError::Transport("connection refused".to_string()));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&req.url) {
            Ok(HttpResponse::new(*status, body.clone()))
        } else {
            Ok(HttpResponse::new(404, "Not Found"))
        }
    }
}

/// Holds every request until the test releases it, in any order.
#[cfg(test)]
pub struct GatedHttpClient {
    pending: RefCell<Vec<(HttpRequest, Option<oneshot::Sender<HttpResponse>>)>>,
}

#[cfg(test)]
impl GatedHttpClient {
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn issued(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Answers the `index`-th issued request.
    pub fn release(&self, index: usize, status: u16, body: serde_json::Value) {
        let sender = self
            .pending
            .borrow_mut()
            .get_mut(index)
            .and_then(|(_, tx)| tx.take());
        if let Some(tx) = sender {
            let _ = tx.send(HttpResponse::new(status, body.to_string()));
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for GatedHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push((req, Some(tx)));
        rx.await
            .map_err(|_| ApiError::Transport("request dropped".to_string()))
    }
}
