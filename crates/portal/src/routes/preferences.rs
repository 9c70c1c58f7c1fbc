//! Language and theme preferences.

use axum::{Json, Router, extract::State, routing::get};

use nour_session::Preferences;

use crate::error::AppError;
use crate::state::AppState;

/// Build the preferences router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/preferences", get(show).put(update))
}

/// GET /api/preferences
async fn show(State(state): State<AppState>) -> Result<Json<Preferences>, AppError> {
    let store = state.sessions().persisted();
    Ok(Json(Preferences::load(store.as_ref())?))
}

/// PUT /api/preferences
async fn update(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Preferences>, AppError> {
    preferences.save(state.sessions().persisted().as_ref())?;
    tracing::info!(
        locale = preferences.locale.as_str(),
        theme = preferences.theme.as_str(),
        "Preferences updated"
    );
    Ok(Json(preferences))
}
