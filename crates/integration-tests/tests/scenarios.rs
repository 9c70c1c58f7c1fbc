//! End-to-end scenarios across the portal and the backend pipeline.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode, header};
use reqwest::Method as ApiMethod;
use reqwest::StatusCode as ApiStatus;
use serde_json::{Value, json};

use nour_integration_tests::TestContext;
use nour_session::{ApiRequest, MockTransport};

const INVALID_CREDENTIALS: &str = "البريد الإلكتروني أو كلمة المرور غير صحيحة";

fn backend() -> MockTransport {
    MockTransport::builder()
        .respond(ApiMethod::GET, "dashboard/stats", ApiStatus::OK, json!({ "donations": 42 }))
        .respond(ApiMethod::GET, "donor/receipts", ApiStatus::OK, json!([]))
        .respond(
            ApiMethod::GET,
            "admin/audit",
            ApiStatus::UNAUTHORIZED,
            json!({ "message": "انتهت صلاحية الجلسة" }),
        )
        .build()
}

async fn admin_login(ctx: &TestContext, email: &str, password: &str) -> nour_integration_tests::TestResponse {
    ctx.portal(
        Method::POST,
        "/api/admin/login",
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

#[tokio::test]
async fn test_admin_login_authorizes_backend_requests() {
    let ctx = TestContext::new(backend());

    let response = admin_login(&ctx, "admin@nour.org", "admin123").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(ctx.sessions().is_admin());

    let token = ctx.sessions().token().unwrap();
    let stats: Value = ctx.api.get_json("dashboard/stats").await.unwrap();
    assert_eq!(stats["donations"], 42);

    let sent = ctx.api.transport().last_request().unwrap();
    assert_eq!(
        sent.headers.get(header::AUTHORIZATION).unwrap().to_str().unwrap(),
        token.bearer()
    );
}

#[tokio::test]
async fn test_rejected_login_changes_nothing() {
    let ctx = TestContext::new(backend());

    for _ in 0..2 {
        let response = admin_login(&ctx, "wrong@x.com", "bad").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], INVALID_CREDENTIALS);
    }

    let snapshot = ctx.portal(Method::GET, "/api/session", None).await.body;
    assert_eq!(snapshot["isAdmin"], false);
    assert_eq!(snapshot["isDonorLoggedIn"], false);

    ctx.api.send(ApiRequest::get("dashboard/stats")).await.unwrap();
    let sent = ctx.api.transport().last_request().unwrap();
    assert!(sent.headers.get(header::AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_guard_round_trip() {
    let ctx = TestContext::new(backend());

    let denied = ctx.portal(Method::GET, "/admin/beneficiaries", None).await;
    assert_eq!(denied.status, StatusCode::SEE_OTHER);
    let location = denied.headers.get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "/admin/login?from=%2Fadmin%2Fbeneficiaries");

    let page = ctx.portal(Method::GET, location, None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["from"], "/admin/beneficiaries");

    let login = ctx
        .portal(
            Method::POST,
            "/api/admin/login",
            Some(json!({
                "email": "admin@nour.org",
                "password": "admin123",
                "from": page.body["from"],
            })),
        )
        .await;
    assert_eq!(login.body["redirect"], "/admin/beneficiaries");

    let allowed = ctx.portal(Method::GET, "/admin/beneficiaries", None).await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["admin"]["email"], "admin@nour.org");
}

#[tokio::test]
async fn test_donor_is_new_depends_on_name() {
    let ctx = TestContext::new(backend());

    let fresh = ctx
        .portal(
            Method::POST,
            "/api/donor/login",
            Some(json!({ "phone": "01000000000", "profile": { "name": "X" } })),
        )
        .await;
    assert_eq!(fresh.body["isNew"], true);

    let returning = ctx
        .portal(
            Method::POST,
            "/api/donor/login",
            Some(json!({ "phone": "01000000000" })),
        )
        .await;
    assert_eq!(returning.body["isNew"], false);
    assert_eq!(returning.body["name"], "فاعل خير");
}

#[tokio::test]
async fn test_unauthorized_reply_evicts_every_session() {
    let ctx = TestContext::new(backend());
    admin_login(&ctx, "admin@nour.org", "admin123").await;
    ctx.portal(
        Method::POST,
        "/api/donor/login",
        Some(json!({ "phone": "01000000000" })),
    )
    .await;

    let err = ctx.api.send(ApiRequest::get("admin/audit")).await.unwrap_err();
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "انتهت صلاحية الجلسة");

    let snapshot = ctx.portal(Method::GET, "/api/session", None).await.body;
    assert_eq!(snapshot["isAdmin"], false);
    assert_eq!(snapshot["isDonorLoggedIn"], false);

    let guarded = ctx.portal(Method::GET, "/admin", None).await;
    assert_eq!(guarded.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_donor_token_used_when_admin_logs_out() {
    let ctx = TestContext::new(backend());
    ctx.portal(
        Method::POST,
        "/api/donor/login",
        Some(json!({ "phone": "01000000000" })),
    )
    .await;
    let donor_token = ctx.sessions().token().unwrap();

    admin_login(&ctx, "admin@nour.org", "admin123").await;
    ctx.portal(Method::POST, "/api/admin/logout", None).await;

    ctx.api.send(ApiRequest::get("donor/receipts")).await.unwrap();
    let sent = ctx.api.transport().last_request().unwrap();
    assert_eq!(
        sent.headers.get(header::AUTHORIZATION).unwrap().to_str().unwrap(),
        donor_token.bearer()
    );
}

#[tokio::test]
async fn test_notifications_follow_sessions() {
    let ctx = TestContext::new(backend());
    admin_login(&ctx, "admin@nour.org", "admin123").await;

    for _ in 0..3 {
        ctx.portal(Method::GET, "/admin", None).await;
    }
    let admin = ctx
        .portal(Method::GET, "/api/notifications?role=admin", None)
        .await;
    assert_eq!(admin.body["notifications"].as_array().unwrap().len(), 5);

    ctx.portal(
        Method::POST,
        "/api/donor/login",
        Some(json!({ "phone": "01000000000" })),
    )
    .await;
    let all = ctx.portal(Method::GET, "/api/notifications", None).await;
    assert_eq!(all.body["notifications"].as_array().unwrap().len(), 9);
    assert_eq!(all.body["unreadCount"], 6);
}
