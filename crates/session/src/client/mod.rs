//! HTTP client pipeline.
//!
//! Every outgoing request passes two stages around the [`Transport`]:
//!
//! 1. **Request**: attach `Authorization: Bearer <token>` when the session
//!    store resolves a credential (admin before donor). Never fails.
//! 2. **Response**: success passes through; any failure becomes a
//!    [`NormalizedError`]. A 401 evicts both sessions. No retries.

mod error;
mod http;
mod mock;
mod request;

pub use error::{FALLBACK_MESSAGE, NormalizedError, TransportError};
pub use http::HttpTransport;
pub use mock::{MockTransport, MockTransportBuilder};
pub use request::{ApiRequest, ApiResponse};

use std::future::Future;
use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::session::SessionStore;

/// Carries a request to the backend and back.
///
/// Implementations report every HTTP response as `Ok`, whatever its status;
/// `Err` is reserved for requests that produced no response at all.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

/// The authorized, normalizing API client.
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: Arc<T>,
    sessions: SessionStore,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            sessions: self.sessions.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn new(transport: T, sessions: SessionStore) -> Self {
        Self {
            transport: Arc::new(transport),
            sessions,
        }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request through both pipeline stages.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] for non-success statuses and transport
    /// failures. A 401 additionally logs out both roles before returning.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, NormalizedError> {
        let request = self.authorize(request);
        let outcome = self.transport.send(request).await;
        self.settle(outcome)
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send); an undecodable success body is also reported
    /// as a [`NormalizedError`].
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, NormalizedError> {
        let response = self.send(ApiRequest::get(path)).await?;
        decode(&response)
    }

    /// `POST path` with a JSON body and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// As [`get_json`](Self::get_json); a body that cannot be serialized is
    /// reported without sending anything.
    pub async fn post_json<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, NormalizedError> {
        let body = serde_json::to_value(body)
            .map_err(|e| NormalizedError::from(TransportError::Encode(e.to_string())))?;
        let response = self.send(ApiRequest::post(path).json(body)).await?;
        decode(&response)
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, NormalizedError> {
        self.send(ApiRequest::delete(path)).await
    }

    fn authorize(&self, mut request: ApiRequest) -> ApiRequest {
        let Some(token) = self.sessions.token() else {
            return request;
        };

        match HeaderValue::from_str(&token.bearer()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token is not a valid header value, sending anonymously");
            }
        }
        request
    }

    fn settle(
        &self,
        outcome: Result<ApiResponse, TransportError>,
    ) -> Result<ApiResponse, NormalizedError> {
        let failure = match outcome {
            Ok(response) if response.status.is_success() => return Ok(response),
            Ok(response) => TransportError::Status {
                status: response.status.as_u16(),
                body: response.body,
            },
            Err(e) => e,
        };

        if failure.status() == Some(StatusCode::UNAUTHORIZED.as_u16()) {
            tracing::warn!("Backend rejected credentials, evicting all sessions");
            if let Err(e) = self.sessions.evict_all() {
                tracing::error!(error = %e, "Failed to clear persisted sessions after 401");
            }
        }

        let error = NormalizedError::from(failure);
        tracing::warn!(status = ?error.status, message = %error.message, "API request failed");
        Err(error)
    }
}

fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, NormalizedError> {
    response.decode().map_err(|e| {
        NormalizedError::from(TransportError::Decode {
            status: response.status.as_u16(),
            message: e.to_string(),
        })
    })
}
