#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use scanportal::config::ProgressConfig;
use scanportal::gateway::{GatewayClient, LoginGrant, RequestOutcome, ScanSubmission, SummaryResult};

pub const STUB_TOKEN: &str = "t1";

// Stub of the remote portal API

async fn login(Json(body): Json<Value>) -> Response {
    match body["password"].as_str().unwrap_or_default() {
        "right" => Json(json!({ "token": STUB_TOKEN })).into_response(),
        "wrong" => (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad credentials" }))).into_response(),
        "notoken" => Json(json!({ "user": "a@b.com" })).into_response(),
        "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", STUB_TOKEN))
        .unwrap_or(false)
}

async fn scan_requests(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" }))).into_response();
    }
    match body["url"].as_str().unwrap_or_default() {
        "https://ok.example" => Json(json!({ "redirectUrl": "/scanner/results?scanId=42" })).into_response(),
        "https://noredirect.example" => Json(json!({ "status": "queued" })).into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "scanner offline").into_response(),
    }
}

async fn summary(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" }))).into_response();
    }
    match params.get("scanId").map(String::as_str) {
        Some("42") => Json(json!({ "Summary": "3 findings, 1 high" })).into_response(),
        Some("empty") => Json(json!({ "Summary": "" })).into_response(),
        Some("missing") => Json(json!({})).into_response(),
        Some("a b&c") => Json(json!({ "Summary": "encoded ok" })).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "no such scan" }))).into_response(),
    }
}

/// Serve the stub API on an ephemeral port; returns its base URL.
pub async fn spawn_stub_api() -> String {
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/scan-requests", post(scan_requests))
        .route("/api/scanners/summary", get(summary));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// Scripted gateway for controller tests

pub struct FakeGateway {
    pub login_outcome: RequestOutcome<LoginGrant>,
    pub scan_outcome: RequestOutcome<ScanSubmission>,
    pub summary_outcome: RequestOutcome<SummaryResult>,
    pub delay: Duration,
    pub login_calls: AtomicUsize,
    pub scan_calls: AtomicUsize,
    pub summary_calls: AtomicUsize,
    pub last_token: Mutex<Option<String>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            login_outcome: RequestOutcome::NetworkOrServerError("unscripted".into()),
            scan_outcome: RequestOutcome::NetworkOrServerError("unscripted".into()),
            summary_outcome: RequestOutcome::NetworkOrServerError("unscripted".into()),
            delay: Duration::ZERO,
            login_calls: AtomicUsize::new(0),
            scan_calls: AtomicUsize::new(0),
            summary_calls: AtomicUsize::new(0),
            last_token: Mutex::new(None),
        }
    }
}

impl FakeGateway {
    pub fn logins(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn scans(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    pub fn summaries(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl GatewayClient for FakeGateway {
    async fn login(&self, _email: &str, _password: &str) -> RequestOutcome<LoginGrant> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.login_outcome.clone()
    }

    async fn submit_scan(&self, _url: &str, token: &str) -> RequestOutcome<ScanSubmission> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = Some(token.to_string());
        self.pause().await;
        self.scan_outcome.clone()
    }

    async fn fetch_summary(&self, _scan_id: &str, token: &str) -> RequestOutcome<SummaryResult> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = Some(token.to_string());
        self.pause().await;
        self.summary_outcome.clone()
    }

    fn base_url(&self) -> &str {
        "fake://portal"
    }
}

pub fn fast_progress() -> ProgressConfig {
    ProgressConfig {
        tick_ms: 5,
        step: 7,
        ceiling: 90,
        completion_hold_ms: 0,
    }
}

pub fn shared(gateway: FakeGateway) -> Arc<FakeGateway> {
    Arc::new(gateway)
}
