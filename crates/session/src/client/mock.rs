//! In-process mock backend.
//!
//! Replies with canned JSON after a configurable delay, and records every
//! request it receives so tests can inspect headers.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

use super::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Debug, Clone)]
enum Reply {
    Json(StatusCode, Value),
    Fail(TransportError),
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    reply: Reply,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    routes: Vec<Route>,
    latency: Duration,
    sent: Mutex<Vec<ApiRequest>>,
}

/// A [`Transport`] answering from a fixed route table.
///
/// Unknown routes get `404 {"message": "Not found"}`.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<MockTransportInner>,
}

/// Builder for [`MockTransport`].
#[derive(Debug, Default)]
pub struct MockTransportBuilder {
    routes: Vec<Route>,
    latency: Duration,
}

impl MockTransport {
    #[must_use]
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder::default()
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner
            .sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.inner
            .sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn reply_for(&self, request: &ApiRequest) -> Reply {
        let path = request.relative_path();
        self.inner
            .routes
            .iter()
            .find(|r| r.method == request.method && r.path == path)
            .map_or_else(
                || Reply::Json(StatusCode::NOT_FOUND, json!({ "message": "Not found" })),
                |r| r.reply.clone(),
            )
    }
}

impl MockTransportBuilder {
    /// Delay every reply by `latency`.
    #[must_use]
    pub const fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Answer `method path` with `status` and a JSON body.
    #[must_use]
    pub fn respond(mut self, method: Method, path: &str, status: StatusCode, body: Value) -> Self {
        self.routes.push(Route {
            method,
            path: path.trim_start_matches('/').to_string(),
            reply: Reply::Json(status, body),
        });
        self
    }

    /// Fail `method path` without a response.
    #[must_use]
    pub fn fail(mut self, method: Method, path: &str, error: TransportError) -> Self {
        self.routes.push(Route {
            method,
            path: path.trim_start_matches('/').to_string(),
            reply: Reply::Fail(error),
        });
        self
    }

    #[must_use]
    pub fn build(self) -> MockTransport {
        MockTransport {
            inner: Arc::new(MockTransportInner {
                routes: self.routes,
                latency: self.latency,
                sent: Mutex::new(Vec::new()),
            }),
        }
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = self.reply_for(&request);
        self.inner
            .sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if !self.inner.latency.is_zero() {
            tokio::time::sleep(self.inner.latency).await;
        }

        match reply {
            Reply::Json(status, body) => Ok(ApiResponse::json(status, &body)),
            Reply::Fail(error) => Err(error),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_and_records() {
        let mock = MockTransport::builder()
            .respond(Method::GET, "/stats", StatusCode::OK, json!({ "donors": 3 }))
            .build();

        let ok = mock.send(ApiRequest::get("stats")).await.unwrap();
        assert_eq!(ok.status, StatusCode::OK);
        assert_eq!(ok.decode::<Value>().unwrap()["donors"], 3);

        let missing = mock.send(ApiRequest::post("stats")).await.unwrap();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        assert_eq!(mock.requests().len(), 2);
        assert_eq!(mock.last_request().unwrap().method, Method::POST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let mock = MockTransport::builder()
            .latency(Duration::from_millis(800))
            .respond(Method::GET, "ping", StatusCode::OK, json!({}))
            .build();

        let started = tokio::time::Instant::now();
        mock.send(ApiRequest::get("ping")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));
    }
}
