//! Authentication extractors for the admin area.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use nour_session::{AdminSession, GuardDecision, LoginRedirect, RouteGuard, SessionStore};

use super::MessageKey;

/// Extractor that requires an admin session.
///
/// If no admin is logged in, page requests are redirected to the login page
/// (remembering the requested location) and API requests get 401. The
/// session state it sees was reloaded from the shared store by
/// [`navigation_middleware`](super::navigation_middleware).
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("أهلاً {}", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

/// Error returned when admin authentication is required but missing.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page (for page requests).
    RedirectToLogin(LoginRedirect),
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin(redirect) => Redirect::to(&redirect.location()).into_response(),
            Self::Unauthorized => {
                MessageKey("guard.login_required").response(StatusCode::UNAUTHORIZED)
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionStore::from_ref(state);

        if parts.uri.path().starts_with("/api/") {
            return sessions
                .admin()
                .map(Self)
                .ok_or(AdminAuthRejection::Unauthorized);
        }

        let location = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);

        match RouteGuard::new(sessions.clone()).check(&location) {
            GuardDecision::Redirect(redirect) => Err(AdminAuthRejection::RedirectToLogin(redirect)),
            GuardDecision::Authorized => sessions.admin().map(Self).ok_or(
                AdminAuthRejection::RedirectToLogin(LoginRedirect { from: location }),
            ),
        }
    }
}

/// Extractor that optionally gets the current admin.
///
/// Unlike `RequireAdmin`, this never rejects the request.
pub struct OptionalAdmin(pub Option<AdminSession>);

impl<S> FromRequestParts<S> for OptionalAdmin
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(SessionStore::from_ref(state).admin()))
    }
}
