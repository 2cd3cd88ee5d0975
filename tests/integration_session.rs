mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::*;
use medadmin_core::SessionToken;
use serde_json::json;

#[tokio::test]
async fn test_login_sets_cookie_and_loads_permissions() {
    let upstream = spawn_upstream(&["doctor-read", "doctor-view"]).await;
    let (app, state) = setup_test_app(&upstream);

    let response = post_json(
        &app,
        "/login",
        json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with(&format!("token={}", ADMIN_TOKEN)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));

    let body = body_json(response).await;
    assert_eq!(body["redirect_to"], "/dashboard");
    assert_eq!(body["permissions"], "ready");
    assert_eq!(state.sessions.len(), 1);
    assert_eq!(upstream.control.permission_calls(), 1);
}

#[tokio::test]
async fn test_rejected_credentials_leave_no_session() {
    let upstream = spawn_upstream(&["doctor-read"]).await;
    let (app, state) = setup_test_app(&upstream);

    let response = post_json(
        &app,
        "/login",
        json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
    assert!(state.sessions.is_empty());
    assert_eq!(upstream.control.permission_calls(), 0);
}

#[tokio::test]
async fn test_login_validation() {
    let upstream = spawn_upstream(&[]).await;
    let (app, _state) = setup_test_app(&upstream);

    let response = post_json(
        &app,
        "/login",
        json!({ "email": "not-an-email", "password": "x" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "email must be a valid email address");

    let response = post_json(&app, "/login", json!({ "email": ADMIN_EMAIL }), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn test_console_without_cookie_redirects_to_login() {
    let upstream = spawn_upstream(&["doctor-read"]).await;
    let (app, _state) = setup_test_app(&upstream);

    for uri in ["/dashboard", "/doctors", "/session/permissions"] {
        let response = get_with_cookie(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), "/login");
    }
    assert_eq!(upstream.control.permission_calls(), 0);
}

#[tokio::test]
async fn test_login_page_reports_existing_cookie() {
    let upstream = spawn_upstream(&[]).await;
    let (app, _state) = setup_test_app(&upstream);

    let response = get_with_cookie(&app, "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["authenticated"], false);
    assert!(body["redirect_to"].is_null());

    let response = get_with_cookie(&app, "/login", Some("token=tok-admin")).await;
    let body = body_json(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["redirect_to"], "/dashboard");
}

#[tokio::test]
async fn test_logout_clears_cookie_and_session() {
    let upstream = spawn_upstream(&["doctor-read"]).await;
    let (app, state) = setup_test_app(&upstream);
    let cookie = login_cookie(&app).await;
    assert_eq!(state.sessions.len(), 1);

    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let removal = set_cookie(&response);
    assert!(removal.starts_with("token="));
    assert!(removal.contains("Max-Age=0"));
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_upstream_401_mid_session_ends_session() {
    let upstream = spawn_upstream(&["doctor-read", "doctor-view"]).await;
    let (app, state) = setup_test_app(&upstream);
    let cookie = login_cookie(&app).await;

    let response = get_with_cookie(&app, "/doctors", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    upstream.control.revoke();
    let response = get_with_cookie(&app, "/doctors", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(set_cookie(&response).contains("Max-Age=0"));
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_unseen_cookie_loads_directory_once() {
    let upstream = spawn_upstream(&["customer-read"]).await;
    let (app, state) = setup_test_app(&upstream);
    let cookie = format!("token={}", ADMIN_TOKEN);

    let response = get_with_cookie(&app, "/session/permissions", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["permissions"], json!(["customer-read"]));
    assert!(body["loaded_at"].is_string());

    let response = get_with_cookie(&app, "/customers", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(upstream.control.permission_calls(), 1);
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_stale_cookie_redirects_to_login() {
    let upstream = spawn_upstream(&["doctor-read"]).await;
    let (app, state) = setup_test_app(&upstream);

    let response = get_with_cookie(&app, "/dashboard", Some("token=expired-token")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(set_cookie(&response).starts_with("token="));
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_health_needs_no_session() {
    let upstream = spawn_upstream(&[]).await;
    let (app, _state) = setup_test_app(&upstream);

    let response = get_with_cookie(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_failed_first_load_is_not_kept() {
    let upstream = spawn_upstream(&["doctor-read"]).await;
    upstream.control.set_permissions(PermissionsReply::Fail);
    let (app, state) = setup_test_app(&upstream);

    for i in 0..20 {
        let cookie = format!("token=forged-{}", i);
        let response = get_with_cookie(&app, "/doctors", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard?from=%2Fdoctors");
    }
    assert!(state.sessions.is_empty());
    assert_eq!(upstream.control.permission_calls(), 20);

    // The same cookie retries its load on the next request.
    let cookie = format!("token={}", ADMIN_TOKEN);
    let response = get_with_cookie(&app, "/session/permissions", Some(&cookie)).await;
    assert_eq!(body_json(response).await["status"], "failed");
    assert!(state.sessions.is_empty());

    upstream.control.grant(&["doctor-read"]);
    let response = get_with_cookie(&app, "/doctors", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(upstream.control.permission_calls(), 22);
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_login_over_another_cookie_ends_that_session() {
    let upstream = spawn_upstream(&["doctor-read"]).await;
    let (app, state) = setup_test_app(&upstream);

    let staff_cookie = login_cookie_as(&app, STAFF_EMAIL, None).await;
    assert_eq!(staff_cookie, format!("token={}", STAFF_TOKEN));

    let admin_cookie = login_cookie_as(&app, ADMIN_EMAIL, Some(&staff_cookie)).await;
    assert_eq!(admin_cookie, format!("token={}", ADMIN_TOKEN));

    assert_eq!(state.sessions.len(), 1);
    let staff = SessionToken::parse(STAFF_TOKEN).unwrap();
    let admin = SessionToken::parse(ADMIN_TOKEN).unwrap();
    assert!(state.sessions.get(&staff).is_none());
    assert!(state.sessions.get(&admin).is_some());

    // Logging in again as the same account keeps a single session.
    login_cookie_as(&app, ADMIN_EMAIL, Some(&admin_cookie)).await;
    assert_eq!(state.sessions.len(), 1);
}
