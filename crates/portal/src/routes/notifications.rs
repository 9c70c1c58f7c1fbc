//! Notification list and read state.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use nour_core::{NotificationId, Role};
use nour_session::NotificationRecord;

use crate::error::AppError;
use crate::state::AppState;

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", get(list).delete(clear))
        .route("/api/notifications/read-all", post(mark_all_as_read))
        .route("/api/notifications/{id}/read", post(mark_as_read))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    role: Option<Role>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationList {
    notifications: Vec<NotificationRecord>,
    unread_count: usize,
}

/// List notifications, seeding any newly active role first.
///
/// GET /api/notifications?role=
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<NotificationList>, AppError> {
    let center = state.notifications();
    center.sync_with(state.sessions());

    let list = match query.role {
        Some(role) => {
            if !state.sessions().is_active(role) {
                return Err(AppError::Unauthorized(format!("no {role} session")));
            }
            NotificationList {
                notifications: center.for_role(role),
                unread_count: center.unread_count_for(role),
            }
        }
        None => NotificationList {
            notifications: center.list(),
            unread_count: center.unread_count(),
        },
    };

    Ok(Json(list))
}

/// POST /api/notifications/{id}/read
async fn mark_as_read(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> Result<StatusCode, AppError> {
    if state.notifications().mark_as_read(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("notification {id}")))
    }
}

/// POST /api/notifications/read-all
async fn mark_all_as_read(State(state): State<AppState>) -> StatusCode {
    state.notifications().mark_all_as_read();
    StatusCode::NO_CONTENT
}

/// DELETE /api/notifications
async fn clear(State(state): State<AppState>) -> StatusCode {
    state.notifications().clear();
    StatusCode::NO_CONTENT
}
