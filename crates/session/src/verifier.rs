//! Credential verification.
//!
//! Admin login is an exact match against one configured credential. Donor
//! login has no verifier: the phone number reaches the session store only
//! after one-time-password verification upstream, so any well-formed
//! [`Phone`](nour_core::Phone) is accepted.

use secrecy::ExposeSecret;

use nour_core::Email;

use crate::config::AdminCredentialConfig;
use crate::error::AuthError;

/// Who an accepted admin credential belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: Email,
    pub name: String,
    pub name_en: String,
    pub role: String,
    pub role_en: String,
}

/// Decides whether submitted admin credentials are accepted.
///
/// This is the seam where a real backend replaces the configured credential.
pub trait CredentialVerifier: Send + Sync {
    /// Verify an email/password pair.
    ///
    /// Must be pure: no side effects on rejection.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair is rejected.
    fn verify_admin(&self, email: &str, password: &str) -> Result<AdminIdentity, AuthError>;
}

/// Accepts exactly one configured admin credential.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredVerifier {
    credential: AdminCredentialConfig,
}

impl ConfiguredVerifier {
    /// Create a verifier for `credential`.
    #[must_use]
    pub const fn new(credential: AdminCredentialConfig) -> Self {
        Self { credential }
    }
}

impl CredentialVerifier for ConfiguredVerifier {
    fn verify_admin(&self, email: &str, password: &str) -> Result<AdminIdentity, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        if email != self.credential.email || password != self.credential.password.expose_secret() {
            return Err(AuthError::InvalidCredentials);
        }

        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        Ok(AdminIdentity {
            email,
            name: self.credential.name.clone(),
            name_en: self.credential.name_en.clone(),
            role: self.credential.role.clone(),
            role_en: self.credential.role_en.clone(),
        })
    }
}
