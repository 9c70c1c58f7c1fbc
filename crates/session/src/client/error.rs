//! Transport failures and their normalized form.

use std::time::Duration;

use thiserror::Error;

/// Shown when neither the server nor the transport supplied a message.
pub const FALLBACK_MESSAGE: &str = "حدث خطأ غير متوقع";

/// Raw failure reported by a [`Transport`](super::Transport) or by the
/// pipeline's status check.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// Raw response body, kept for extracting a server message.
        body: Vec<u8>,
    },

    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(String),

    /// A success response whose body did not match the expected shape.
    #[error("failed to decode response body: {message}")]
    Decode { status: u16, message: String },
}

impl TransportError {
    /// HTTP status, if the failure came with one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Network(_) | Self::Timeout(_) | Self::Encode(_) => None,
        }
    }

    /// The server-supplied `message` field of an error body.
    fn server_message(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        value
            .get("message")?
            .as_str()
            .filter(|m| !m.trim().is_empty())
            .map(str::to_owned)
    }
}

/// The single failure shape every caller of the pipeline sees.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct NormalizedError {
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// Display message: server message, else transport message, else the
    /// generic fallback.
    pub message: String,
    /// The underlying failure.
    #[source]
    pub original: TransportError,
}

impl NormalizedError {
    /// Whether this failure deauthorized every session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl From<TransportError> for NormalizedError {
    fn from(original: TransportError) -> Self {
        let message = original
            .server_message()
            .or_else(|| {
                let message = original.to_string();
                (!message.trim().is_empty()).then_some(message)
            })
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        Self {
            status: original.status(),
            message,
            original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16, body: &str) -> TransportError {
        TransportError::Status {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_prefers_server_message() {
        let err = NormalizedError::from(status_error(422, r#"{"message":"المبلغ غير صالح"}"#));
        assert_eq!(err.status, Some(422));
        assert_eq!(err.message, "المبلغ غير صالح");
    }

    #[test]
    fn test_falls_back_to_transport_message() {
        let err = NormalizedError::from(status_error(500, "<html>oops</html>"));
        assert_eq!(err.message, "Request failed with status code 500");

        let err = NormalizedError::from(status_error(400, r#"{"message":"  "}"#));
        assert_eq!(err.message, "Request failed with status code 400");

        let err = NormalizedError::from(TransportError::Timeout(Duration::from_secs(30)));
        assert_eq!(err.status, None);
        assert_eq!(err.message, "timeout of 30000ms exceeded");
    }

    #[test]
    fn test_empty_transport_message_uses_fallback() {
        let err = NormalizedError::from(TransportError::Network(String::new()));
        assert_eq!(err.message, FALLBACK_MESSAGE);
        assert!(!err.is_unauthorized());
    }
}
