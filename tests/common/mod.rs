//! Shared harness: a fake marketplace API on an ephemeral port and helpers to
//! drive the console router with `oneshot`.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use medadmin::router::init_router;
use medadmin::state::AppState;
use medadmin_client::ApiClient;
use medadmin_config::{CorsConfig, SessionConfig, UpstreamConfig};
use serde_json::{Value, json};
use tokio::sync::Notify;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret";
pub const ADMIN_TOKEN: &str = "tok-admin";
pub const STAFF_EMAIL: &str = "staff@example.com";
pub const STAFF_TOKEN: &str = "tok-staff";

#[derive(Debug, Clone)]
pub enum PermissionsReply {
    Grant(Vec<String>),
    Fail,
    Malformed,
}

/// Knobs for the fake upstream, shared with the test.
#[derive(Debug)]
pub struct UpstreamControl {
    permissions: Mutex<PermissionsReply>,
    revoked: AtomicBool,
    permission_calls: AtomicUsize,
    held: AtomicBool,
    release: Notify,
}

impl UpstreamControl {
    pub fn grant(&self, names: &[&str]) {
        *self.permissions.lock().unwrap() =
            PermissionsReply::Grant(names.iter().map(|name| name.to_string()).collect());
    }

    pub fn set_permissions(&self, reply: PermissionsReply) {
        *self.permissions.lock().unwrap() = reply;
    }

    /// Every authenticated endpoint answers 401 from now on.
    pub fn revoke(&self) {
        self.revoked.store(true, Ordering::SeqCst);
    }

    pub fn permission_calls(&self) -> usize {
        self.permission_calls.load(Ordering::SeqCst)
    }

    /// Permission replies wait for [`Self::release`] from now on.
    pub fn hold_permissions(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.release.notify_one();
    }

    /// Polls until `count` permission calls have arrived.
    pub async fn wait_for_permission_calls(&self, count: usize) {
        for _ in 0..200 {
            if self.permission_calls() >= count {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("expected {} permission calls, saw {}", count, self.permission_calls());
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        if self.revoked.load(Ordering::SeqCst) {
            return false;
        }
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        matches!(bearer, Some(ADMIN_TOKEN) | Some(STAFF_TOKEN))
    }
}

pub struct FakeUpstream {
    pub base_url: String,
    pub control: Arc<UpstreamControl>,
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthenticated." })),
    )
        .into_response()
}

async fn login(mut form: Multipart) -> Response {
    let mut email = String::new();
    let mut password = String::new();
    while let Ok(Some(field)) = form.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.unwrap_or_default();
        match name.as_str() {
            "email" => email = value,
            "password" => password = value,
            _ => {}
        }
    }

    let token = match email.as_str() {
        ADMIN_EMAIL => Some(ADMIN_TOKEN),
        STAFF_EMAIL => Some(STAFF_TOKEN),
        _ => None,
    };
    match token.filter(|_| password == ADMIN_PASSWORD) {
        Some(token) => Json(json!({ "status": true, "data": { "token": token } })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response(),
    }
}

async fn role_permission(
    State(control): State<Arc<UpstreamControl>>,
    headers: HeaderMap,
) -> Response {
    control.permission_calls.fetch_add(1, Ordering::SeqCst);
    if control.held.load(Ordering::SeqCst) {
        control.release.notified().await;
    }

    // An outage answers before the token is even looked at.
    let reply = control.permissions.lock().unwrap().clone();
    if let PermissionsReply::Fail = reply {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Server Error" })),
        )
            .into_response();
    }
    if !control.authorized(&headers) {
        return unauthenticated();
    }

    match reply {
        PermissionsReply::Grant(names) => Json(json!({ "data": names })).into_response(),
        PermissionsReply::Malformed => Json(json!({ "permissions": "all" })).into_response(),
        PermissionsReply::Fail => unreachable!(),
    }
}

async fn transactions(State(control): State<Arc<UpstreamControl>>, headers: HeaderMap) -> Response {
    if !control.authorized(&headers) {
        return unauthenticated();
    }
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "message": "maintenance" })),
    )
        .into_response()
}

async fn create_service(State(control): State<Arc<UpstreamControl>>, headers: HeaderMap) -> Response {
    if !control.authorized(&headers) {
        return unauthenticated();
    }
    (StatusCode::CONFLICT, "duplicate").into_response()
}

/// Echoes the call back so tests can see what was forwarded.
async fn echo(
    State(control): State<Arc<UpstreamControl>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !control.authorized(&headers) {
        return unauthenticated();
    }

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "content_type": headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        "body": String::from_utf8_lossy(&body),
    }))
    .into_response()
}

/// Starts the fake marketplace API granting `grants` to the admin token.
pub async fn spawn_upstream(grants: &[&str]) -> FakeUpstream {
    let control = Arc::new(UpstreamControl {
        permissions: Mutex::new(PermissionsReply::Grant(Vec::new())),
        revoked: AtomicBool::new(false),
        permission_calls: AtomicUsize::new(0),
        held: AtomicBool::new(false),
        release: Notify::new(),
    });
    control.grant(grants);

    let router = Router::new()
        .route("/api/login", post(login))
        .route("/api/role-permission", get(role_permission))
        .route("/api/transaction", get(transactions))
        .route("/api/service", post(create_service).get(echo))
        .route("/api/{*rest}", any(echo))
        .with_state(Arc::clone(&control));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    FakeUpstream {
        base_url: format!("http://{}/api", addr),
        control,
    }
}

/// Console router wired to `upstream`. The state is returned so tests can
/// inspect the session registry.
pub fn setup_test_app(upstream: &FakeUpstream) -> (Router, AppState) {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let api = ApiClient::with_http(http, UpstreamConfig::new(&upstream.base_url));
    let state = AppState::with_api(api, SessionConfig::default(), CorsConfig::default());
    (init_router(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// Logs in as the admin and returns the `Cookie` header value to send back.
pub async fn login_cookie(app: &Router) -> String {
    login_cookie_as(app, ADMIN_EMAIL, None).await
}

/// Logs in as `email`, optionally over an existing cookie.
pub async fn login_cookie_as(app: &Router, email: &str, cookie: Option<&str>) -> String {
    let response = post_json(
        app,
        "/login",
        json!({ "email": email, "password": ADMIN_PASSWORD }),
        cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    set_cookie(&response)
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Labels of every visible navigation link, in order.
pub fn nav_labels(navigation: &Value) -> Vec<String> {
    navigation["sections"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|section| section["links"].as_array().unwrap().iter())
        .map(|link| link["label"].as_str().unwrap().to_string())
        .collect()
}

pub fn nav_titles(navigation: &Value) -> Vec<String> {
    navigation["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|section| section["title"].as_str().unwrap().to_string())
        .collect()
}
