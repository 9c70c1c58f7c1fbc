//! Donor login, logout and profile photo.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{post, put},
};
use serde::Deserialize;

use nour_core::{Phone, Photo};
use nour_session::{DonorProfile, DonorSession};

use super::admin::PhotoUpload;
use crate::error::AppError;
use crate::state::AppState;

/// Build the donor router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/donor/login", post(login))
        .route("/api/donor/logout", post(logout))
        .route("/api/donor/photo", put(update_photo))
}

#[derive(Debug, Deserialize)]
struct DonorLogin {
    phone: String,
    profile: Option<DonorProfile>,
}

/// Start a donor session for an already-verified phone.
///
/// POST /api/donor/login
async fn login(
    State(state): State<AppState>,
    Json(body): Json<DonorLogin>,
) -> Result<Json<DonorSession>, AppError> {
    let phone = Phone::parse(&body.phone).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let session = state.sessions().login_donor(phone, body.profile)?;
    Ok(Json(session))
}

/// End the donor session.
///
/// POST /api/donor/logout
async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.sessions().logout_donor()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the donor's profile photo.
///
/// PUT /api/donor/photo
async fn update_photo(
    State(state): State<AppState>,
    Json(upload): Json<PhotoUpload>,
) -> Result<Json<DonorSession>, AppError> {
    let photo = Photo::parse(&upload.photo).map_err(|e| AppError::BadRequest(e.to_string()))?;

    state
        .sessions()
        .update_donor_photo(photo)?
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("no donor session".to_string()))
}
