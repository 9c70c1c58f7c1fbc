//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Health check
//! GET    /api/session                 - Both roles at once
//!
//! # Admin
//! GET    /admin/login?from=           - Login page descriptor
//! POST   /api/admin/login             - Verify credential, start session
//! POST   /api/admin/logout            - End session
//! GET    /admin, /admin/{*path}       - Dashboard shell (guarded)
//! PUT    /api/admin/photo             - Replace photo (guarded)
//!
//! # Donor
//! POST   /api/donor/login             - Start session for a verified phone
//! POST   /api/donor/logout            - End session
//! PUT    /api/donor/photo             - Replace photo
//!
//! # Notifications
//! GET    /api/notifications?role=     - List (seeds active roles)
//! POST   /api/notifications/{id}/read - Mark one read
//! POST   /api/notifications/read-all  - Mark all read
//! DELETE /api/notifications           - Clear and reset seeding
//!
//! # Preferences
//! GET    /api/preferences
//! PUT    /api/preferences
//! ```

use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod donor;
pub mod notifications;
pub mod preferences;

/// Build the combined router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(admin::router())
        .merge(donor::router())
        .merge(notifications::router())
        .merge(preferences::router())
}
