//! CLI command implementations.

use std::sync::Arc;

use thiserror::Error;

use nour_core::{EmailError, PhoneError, PhotoError};
use nour_session::config::ConfigError;
use nour_session::verifier::ConfiguredVerifier;
use nour_session::{
    AuthError, FileStore, NormalizedError, SessionConfig, SessionStore, StoreError, TransportError,
};

pub mod request;
pub mod session;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Invalid phone: {0}")]
    Phone(#[from] PhoneError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid photo: {0}")]
    Photo(#[from] PhotoError),

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("Invalid HTTP method: {0}")]
    Method(String),

    #[error("{0} is not logged in")]
    NotLoggedIn(nour_core::Role),

    #[error("Request failed: {0}")]
    Request(#[from] NormalizedError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Open the file-backed session store named by the configuration.
///
/// # Errors
///
/// Returns an error if the store file is unreadable or corrupt.
pub fn open_sessions(config: &SessionConfig) -> Result<SessionStore, CliError> {
    let store = FileStore::open(&config.store_path)?;
    tracing::debug!(path = %store.path().display(), "Opened session store");

    Ok(SessionStore::open(
        Arc::new(store),
        ConfiguredVerifier::new(config.admin.clone()),
    )?)
}
