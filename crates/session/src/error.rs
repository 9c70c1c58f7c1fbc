//! Session and persistence error types.

use thiserror::Error;

/// Errors raised by a [`PersistedStore`](crate::store::PersistedStore).
///
/// These are the unexpected failures: a missing login is never a
/// `StoreError`, an unreadable backing file is.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium holds something that is not a key-value map.
    #[error("store is corrupt: {0}")]
    Corrupt(String),

    /// A value could not be serialized for storage.
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted email/password pair does not match the configured admin.
    ///
    /// Deliberately does not say which field was wrong.
    #[error("البريد الإلكتروني أو كلمة المرور غير صحيحة")]
    InvalidCredentials,

    /// The session could not be persisted.
    #[error("session storage error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Translation key for the user-facing message.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "auth.invalid_credentials",
            Self::Store(_) => "common.unexpected_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "البريد الإلكتروني أو كلمة المرور غير صحيحة"
        );
        assert_eq!(
            AuthError::InvalidCredentials.message_key(),
            "auth.invalid_credentials"
        );
    }

    #[test]
    fn test_store_error_wraps() {
        let err: AuthError = StoreError::Corrupt("bad json".to_string()).into();
        assert_eq!(
            err.to_string(),
            "session storage error: store is corrupt: bad json"
        );
    }
}
