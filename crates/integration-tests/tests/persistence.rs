//! File-backed persistence shared between processes.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use nour_integration_tests::{TestContext, open_file_sessions};
use nour_session::store::{FileStore, PersistedStore, keys};
use nour_session::{MockTransport, StoreError};

#[tokio::test]
async fn test_portal_login_visible_to_second_process() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let portal = TestContext::with_file_store(&path, MockTransport::default()).unwrap();
    let response = portal
        .portal(
            Method::POST,
            "/api/admin/login",
            Some(json!({ "email": "admin@nour.org", "password": "admin123" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let cli = open_file_sessions(&path).unwrap();
    assert!(cli.is_admin());
    assert_eq!(cli.token(), portal.sessions().token());

    let page = portal.portal(Method::GET, "/admin", None).await;
    assert_eq!(page.status, StatusCode::OK);

    cli.logout_admin().unwrap();

    let page = portal.portal(Method::GET, "/admin/campaigns", None).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    let snapshot = portal.portal(Method::GET, "/api/session", None).await;
    assert_eq!(snapshot.body["isAdmin"], false);
}

#[tokio::test]
async fn test_photo_upload_after_cli_logout_leaves_no_orphan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let portal = TestContext::with_file_store(&path, MockTransport::default()).unwrap();
    portal
        .portal(
            Method::POST,
            "/api/donor/login",
            Some(json!({ "phone": "01000000000" })),
        )
        .await;

    open_file_sessions(&path).unwrap().logout_donor().unwrap();

    let upload = portal
        .portal(
            Method::PUT,
            "/api/donor/photo",
            Some(json!({ "photo": "data:image/png;base64,cG5n" })),
        )
        .await;
    assert_eq!(upload.status, StatusCode::UNAUTHORIZED);

    let raw = FileStore::open(&path).unwrap();
    assert!(raw.get(keys::DONOR_SESSION).unwrap().is_none());
    assert!(raw.get(keys::DONOR_TOKEN).unwrap().is_none());
}

#[tokio::test]
async fn test_errors_use_locale_saved_by_cli() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let portal = TestContext::with_file_store(&path, MockTransport::default()).unwrap();

    let store = FileStore::open(&path).unwrap();
    nour_session::Preferences {
        locale: nour_core::Locale::En,
        theme: nour_core::Theme::Light,
    }
    .save(&store)
    .unwrap();

    let denied = portal
        .portal(Method::GET, "/api/notifications?role=admin", None)
        .await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    let rejected = portal
        .portal(
            Method::POST,
            "/api/admin/login",
            Some(json!({ "email": "wrong@x.com", "password": "bad" })),
        )
        .await;
    assert_eq!(rejected.body["message"], "Invalid email or password");
}

#[test]
fn test_orphaned_token_is_healed_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"donor_token":"donor-left-behind","theme":"dark"}"#).unwrap();

    let sessions = open_file_sessions(&path).unwrap();
    assert!(!sessions.is_donor_logged_in());
    assert!(sessions.token().is_none());

    let raw = FileStore::open(&path).unwrap();
    assert!(raw.get(keys::DONOR_TOKEN).unwrap().is_none());
    assert_eq!(raw.get(keys::THEME).unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_corrupt_store_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(matches!(
        open_file_sessions(&path),
        Err(StoreError::Corrupt(_))
    ));
}

#[tokio::test]
async fn test_preferences_persist_next_to_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let portal = TestContext::with_file_store(&path, MockTransport::default()).unwrap();
    portal
        .portal(
            Method::PUT,
            "/api/preferences",
            Some(json!({ "locale": "en", "theme": "dark" })),
        )
        .await;

    let store: Arc<dyn PersistedStore> = Arc::new(FileStore::open(&path).unwrap());
    let prefs = nour_session::Preferences::load(store.as_ref()).unwrap();
    assert_eq!(prefs.locale, nour_core::Locale::En);
    assert_eq!(prefs.theme, nour_core::Theme::Dark);
}
