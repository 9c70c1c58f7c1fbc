//! Guarded admin dashboard routes.

use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};

use nour_core::{Photo, Role};
use nour_session::{AdminSession, Preferences};

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(layout))
        .route("/admin/{*path}", get(layout))
        .route("/api/admin/photo", put(update_photo))
}

/// Everything the dashboard shell needs to render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Layout {
    admin: AdminSession,
    path: String,
    unread_count: usize,
    preferences: Preferences,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhotoUpload {
    /// `data:<mime>;base64,...`
    pub photo: String,
}

/// Render the dashboard shell.
///
/// GET /admin, GET /admin/{*path}
async fn layout(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Layout>, AppError> {
    state.notifications().sync_with(state.sessions());
    let preferences = Preferences::load(state.sessions().persisted().as_ref())?;

    Ok(Json(Layout {
        admin,
        path: uri.path().to_string(),
        unread_count: state.notifications().unread_count_for(Role::Admin),
        preferences,
    }))
}

/// Replace the admin's profile photo.
///
/// PUT /api/admin/photo
async fn update_photo(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(upload): Json<PhotoUpload>,
) -> Result<Json<AdminSession>, AppError> {
    let photo = Photo::parse(&upload.photo).map_err(|e| AppError::BadRequest(e.to_string()))?;

    state
        .sessions()
        .update_admin_photo(photo)?
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("admin session ended".to_string()))
}
