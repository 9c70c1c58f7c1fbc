//! Admin authentication and session inspection.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use nour_session::guard::return_path;
use nour_session::session::SessionSnapshot;
use nour_session::translate::Translator;
use nour_session::AdminSession;

use crate::error::AppError;
use crate::middleware::OptionalAdmin;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(session))
        .route("/admin/login", get(login_page))
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
}

#[derive(Debug, Deserialize)]
struct LoginPageQuery {
    from: Option<String>,
}

/// What the login page needs to render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPage {
    title: &'static str,
    from: Option<String>,
    /// Set when an admin is already logged in: where to go instead.
    redirect: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    from: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginSuccess {
    session: AdminSession,
    redirect: String,
}

/// Both roles at once.
///
/// GET /api/session
async fn session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.sessions().snapshot())
}

/// Login page descriptor.
///
/// GET /admin/login?from=
async fn login_page(
    State(state): State<AppState>,
    OptionalAdmin(admin): OptionalAdmin,
    Query(query): Query<LoginPageQuery>,
) -> Result<Json<LoginPage>, AppError> {
    let redirect = admin.map(|_| return_path(query.from.as_deref()).into_owned());

    Ok(Json(LoginPage {
        title: state.catalog()?.t("auth.admin_login_title"),
        from: query.from,
        redirect,
    }))
}

/// Verify the admin credential and start a session.
///
/// POST /api/admin/login
async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginSuccess>, AppError> {
    let session = state.sessions().login_admin(&form.email, &form.password)?;
    let redirect = return_path(form.from.as_deref()).into_owned();

    Ok(Json(LoginSuccess { session, redirect }))
}

/// End the admin session.
///
/// POST /api/admin/logout
async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.sessions().logout_admin()?;
    Ok(StatusCode::NO_CONTENT)
}
