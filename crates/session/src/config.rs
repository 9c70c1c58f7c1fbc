//! Session core configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `NOUR_ADMIN_EMAIL` - Configured administrator email (default: admin@nour.org)
//! - `NOUR_ADMIN_PASSWORD` - Configured administrator password (default: admin123)
//! - `NOUR_ADMIN_NAME` / `NOUR_ADMIN_NAME_EN` - Administrator display names
//! - `NOUR_API_BASE_URL` - Backend API base URL (default: <http://localhost:8080/api/>)
//! - `NOUR_API_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `NOUR_STORE_PATH` - File backing the persisted store (default: .nour/session.json)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use nour_core::Email;

const DEFAULT_ADMIN_EMAIL: &str = "admin@nour.org";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_NAME: &str = "مدير النظام";
const DEFAULT_ADMIN_NAME_EN: &str = "System Administrator";
const DEFAULT_ADMIN_ROLE: &str = "مدير";
const DEFAULT_ADMIN_ROLE_EN: &str = "Administrator";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/";
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORE_PATH: &str = ".nour/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Session core configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The single accepted administrator credential.
    pub admin: AdminCredentialConfig,
    /// Backend API settings for the HTTP pipeline.
    pub api: ApiConfig,
    /// File backing the persisted store.
    pub store_path: PathBuf,
}

/// The configured administrator credential and profile.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentialConfig {
    /// Exact email to match.
    pub email: String,
    /// Exact password to match.
    pub password: SecretString,
    /// Arabic display name placed in the session.
    pub name: String,
    /// English display name placed in the session.
    pub name_en: String,
    /// Arabic role title.
    pub role: String,
    /// English role title.
    pub role_en: String,
}

impl std::fmt::Debug for AdminCredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentialConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("name_en", &self.name_en)
            .field("role", &self.role)
            .field("role_en", &self.role_en)
            .finish()
    }
}

impl Default for AdminCredentialConfig {
    /// The mock backend's built-in administrator.
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
            name: DEFAULT_ADMIN_NAME.to_string(),
            name_en: DEFAULT_ADMIN_NAME_EN.to_string(),
            role: DEFAULT_ADMIN_ROLE.to_string(),
            role_en: DEFAULT_ADMIN_ROLE_EN.to_string(),
        }
    }
}

/// Backend API settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL that request paths are joined onto.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SessionConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            admin: AdminCredentialConfig::from_env()?,
            api: ApiConfig::from_env()?,
            store_path: PathBuf::from(get_env_or_default("NOUR_STORE_PATH", DEFAULT_STORE_PATH)),
        })
    }
}

impl AdminCredentialConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let email = get_env_or_default("NOUR_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL);
        Email::parse(&email)
            .map_err(|e| ConfigError::InvalidEnvVar("NOUR_ADMIN_EMAIL".to_string(), e.to_string()))?;

        let password = get_optional_env("NOUR_ADMIN_PASSWORD")
            .map_or(defaults.password, SecretString::from);

        Ok(Self {
            email,
            password,
            name: get_optional_env("NOUR_ADMIN_NAME").unwrap_or(defaults.name),
            name_en: get_optional_env("NOUR_ADMIN_NAME_EN").unwrap_or(defaults.name_en),
            role: defaults.role,
            role_en: defaults.role_en,
        })
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("NOUR_API_BASE_URL", DEFAULT_API_BASE_URL);
        let base_url = parse_base_url(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("NOUR_API_BASE_URL".to_string(), e))?;

        let timeout_secs = get_env_or_default(
            "NOUR_API_TIMEOUT_SECS",
            &DEFAULT_API_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar("NOUR_API_TIMEOUT_SECS".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse a base URL, ensuring a trailing slash so relative joins keep the
/// last path segment (`/api` + `donations` → `/api/donations`).
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("URL cannot be a base".to_string());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get an environment variable or return a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
