//! Session tokens and the credential used to authorize outgoing requests.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Opaque bearer token issued at login time.
///
/// One token exists per logged-in role. It is stored separately from the
/// session object it belongs to, but always written and cleared together
/// with it. `Debug` never prints the token value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wrap an existing token string (e.g. one read back from persistence).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh, previously unseen token for `role`.
    #[must_use]
    pub fn generate(role: Role) -> Self {
        Self(format!("{}-{}", role.as_str(), Uuid::new_v4().simple()))
    }

    /// Returns the raw token value.
    ///
    /// Only the HTTP pipeline and persistence should need this.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Render the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

/// The credential that authorizes outgoing requests.
///
/// Resolved from the session store with a fixed precedence: an admin session
/// always wins over a donor session when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    /// An administrator is logged in.
    Admin(Token),
    /// Only a donor is logged in.
    Donor(Token),
    /// Anonymous browsing.
    #[default]
    None,
}

impl Credential {
    /// Resolve the credential from the tokens currently held.
    #[must_use]
    pub fn resolve(admin: Option<&Token>, donor: Option<&Token>) -> Self {
        match (admin, donor) {
            (Some(token), _) => Self::Admin(token.clone()),
            (None, Some(token)) => Self::Donor(token.clone()),
            (None, None) => Self::None,
        }
    }

    /// The token to attach, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::Admin(token) | Self::Donor(token) => Some(token),
            Self::None => None,
        }
    }

    /// The role owning the credential, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Admin(_) => Some(Role::Admin),
            Self::Donor(_) => Some(Role::Donor),
            Self::None => None,
        }
    }

    /// Consume the credential, returning its token.
    #[must_use]
    pub fn into_token(self) -> Option<Token> {
        match self {
            Self::Admin(token) | Self::Donor(token) => Some(token),
            Self::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique_and_prefixed() {
        let a = Token::generate(Role::Admin);
        let b = Token::generate(Role::Admin);
        assert_ne!(a, b);
        assert!(a.expose().starts_with("admin-"));
        assert!(Token::generate(Role::Donor).expose().starts_with("donor-"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = Token::new("super-secret-value");
        let debug = format!("{:?}", Credential::Admin(token));
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_admin_token_takes_precedence() {
        let admin = Token::new("a");
        let donor = Token::new("d");

        assert_eq!(
            Credential::resolve(Some(&admin), Some(&donor)),
            Credential::Admin(admin.clone())
        );
        assert_eq!(
            Credential::resolve(None, Some(&donor)),
            Credential::Donor(donor.clone())
        );
        assert_eq!(
            Credential::resolve(Some(&admin), None).token(),
            Some(&admin)
        );
        assert_eq!(Credential::resolve(None, None), Credential::None);
        assert!(Credential::None.token().is_none());
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(Token::new("abc").bearer(), "Bearer abc");
    }
}
