//! Admin area route guard.
//!
//! Evaluated synchronously on every navigation into the admin area. There is
//! no "checking" state: the session store already knows whether an admin is
//! logged in.

use std::borrow::Cow;

use crate::session::SessionStore;

/// The admin login entry point. Always reachable.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

/// Where a successful login lands when no valid return path was given.
pub const ADMIN_HOME_PATH: &str = "/admin";

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected content.
    Authorized,
    /// Send the visitor to the login page.
    Redirect(LoginRedirect),
}

/// Redirect to the admin login page, remembering where the visitor wanted
/// to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    /// The originally requested location (path plus query).
    pub from: String,
}

impl LoginRedirect {
    /// The login URL carrying `from` as a query parameter.
    #[must_use]
    pub fn location(&self) -> String {
        format!(
            "{ADMIN_LOGIN_PATH}?from={}",
            urlencoding::encode(&self.from)
        )
    }
}

/// Guards the `/admin` area on behalf of a [`SessionStore`].
#[derive(Debug, Clone)]
pub struct RouteGuard {
    sessions: SessionStore,
}

impl RouteGuard {
    #[must_use]
    pub const fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }

    /// Decide whether `location` may be rendered.
    ///
    /// Unprotected paths are always authorized.
    #[must_use]
    pub fn check(&self, location: &str) -> GuardDecision {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        if !is_protected(path) || self.sessions.is_admin() {
            return GuardDecision::Authorized;
        }

        tracing::debug!(%location, "Admin area requested without a session");
        GuardDecision::Redirect(LoginRedirect {
            from: location.to_string(),
        })
    }
}

/// Whether `path` lies inside the admin area (login page excluded).
#[must_use]
pub fn is_protected(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    if path == ADMIN_LOGIN_PATH {
        return false;
    }
    path == ADMIN_HOME_PATH || path.starts_with("/admin/")
}

/// Where to navigate after a successful login.
///
/// Only same-origin relative paths are honored; anything else (absolute
/// URLs, scheme-relative `//host` paths, backslash tricks) falls back to
/// the dashboard home.
#[must_use]
pub fn return_path(from: Option<&str>) -> Cow<'_, str> {
    match from {
        Some(from)
            if from.starts_with('/')
                && !from.starts_with("//")
                && !from.contains('\\')
                && !from.chars().any(char::is_control) =>
        {
            Cow::Borrowed(from)
        }
        _ => Cow::Borrowed(ADMIN_HOME_PATH),
    }
}
