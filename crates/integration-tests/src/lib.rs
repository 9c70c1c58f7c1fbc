//! Integration tests for Nour.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nour-integration-tests
//! ```
//!
//! Everything runs in-process: the portal router is driven with
//! `tower::ServiceExt::oneshot`, and the backend API is a
//! [`MockTransport`] sharing the same [`SessionStore`].
//!
//! # Test Categories
//!
//! - `scenarios` - Login, guard and 401 eviction across portal and pipeline
//! - `persistence` - File-backed store shared between processes

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use nour_portal::state::AppState;
use nour_session::verifier::ConfiguredVerifier;
use nour_session::{ApiClient, FileStore, MockTransport, NotificationCenter, SessionStore, StoreError};

/// A portal response, decoded.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// One portal instance plus a backend client sharing its sessions.
pub struct TestContext {
    pub state: AppState,
    pub api: ApiClient<MockTransport>,
}

impl TestContext {
    /// In-memory sessions and the given mock backend.
    #[must_use]
    pub fn new(backend: MockTransport) -> Self {
        Self::with_sessions(SessionStore::in_memory(), backend)
    }

    /// Sessions persisted to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file is unreadable or corrupt.
    pub fn with_file_store(path: &Path, backend: MockTransport) -> Result<Self, StoreError> {
        Ok(Self::with_sessions(open_file_sessions(path)?, backend))
    }

    fn with_sessions(sessions: SessionStore, backend: MockTransport) -> Self {
        Self {
            api: ApiClient::new(backend, sessions.clone()),
            state: AppState::new(sessions, NotificationCenter::new()),
        }
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        self.state.sessions()
    }

    /// Send one request through the portal router.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails, which
    /// only happens on a broken test.
    #[allow(clippy::unwrap_used)]
    pub async fn portal(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = nour_portal::app(self.state.clone())
            .oneshot(request)
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }
}

/// Open a session store backed by the file at `path`.
///
/// # Errors
///
/// Returns an error if the store file is unreadable or corrupt.
pub fn open_file_sessions(path: &Path) -> Result<SessionStore, StoreError> {
    SessionStore::open(
        Arc::new(FileStore::open(path)?),
        ConfiguredVerifier::default(),
    )
}
