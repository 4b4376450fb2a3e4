//! Shared helpers: an in-process fake of the Geode index and settings pointing at it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use modmirror::settings::{FetchStrategy, UpstreamSettings};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// How the fake answers `/v1/mods`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Serve pages from `mods`.
    Normal,
    /// Answer with this status code.
    Status(u16),
    /// Answer 200 with a body lacking `payload.data`.
    Malformed,
}

/// Fake index state, inspectable from tests.
pub struct FakeIndex {
    pub mods: Mutex<Vec<Value>>,
    /// Overrides `payload.count` when set.
    pub reported_count: Mutex<Option<u64>>,
    pub mode: Mutex<Mode>,
    pub failing_logos: Mutex<Vec<String>>,
    /// Query strings of every `/v1/mods` request, in arrival order.
    pub requests: Mutex<Vec<HashMap<String, String>>>,
}

impl FakeIndex {
    pub fn set_mode(&self, mode: Mode) {
        *self.mode.lock().expect("lock") = mode;
    }

    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().expect("lock").clone()
    }
}

/// Upstream-shaped mod object with a few fields the mirror does not interpret.
pub fn mod_json(id: &str, name: &str, downloads: u64) -> Value {
    json!({
        "id": id,
        "repository": format!("https://github.com/example/{id}"),
        "featured": false,
        "download_count": downloads,
        "developers": [{ "username": "dev", "display_name": "Dev", "is_owner": true }],
        "versions": [{
            "name": name,
            "description": format!("{name} for Geometry Dash"),
            "version": "v1.2.0",
            "geode": "3.4.0"
        }],
        "tags": ["utility"]
    })
}

/// The bytes the fake serves as the logo of `id`.
pub fn logo_bytes(id: &str) -> Vec<u8> {
    format!("png:{id}").into_bytes()
}

async fn mods_handler(
    State(index): State<Arc<FakeIndex>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    index.requests.lock().expect("lock").push(params.clone());
    let mode = *index.mode.lock().expect("lock");
    match mode {
        Mode::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "upstream down").into_response()
        }
        Mode::Malformed => Json(json!({ "payload": { "count": 1 } })).into_response(),
        Mode::Normal => {
            let mods = index.mods.lock().expect("lock").clone();
            let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
            let per_page: usize = params
                .get("per_page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(10);
            let start = page.saturating_sub(1).saturating_mul(per_page).min(mods.len());
            let end = start.saturating_add(per_page).min(mods.len());
            let count = index
                .reported_count
                .lock()
                .expect("lock")
                .unwrap_or(mods.len() as u64);
            Json(json!({
                "error": "",
                "payload": { "count": count, "data": mods[start..end].to_vec() }
            }))
            .into_response()
        }
    }
}

async fn logo_handler(State(index): State<Arc<FakeIndex>>, Path(id): Path<String>) -> Response {
    if index.failing_logos.lock().expect("lock").contains(&id) {
        return (StatusCode::NOT_FOUND, "no logo").into_response();
    }
    logo_bytes(&id).into_response()
}

/// Start the fake on an ephemeral port; returns its base URL and state.
pub async fn spawn_fake_index(mods: Vec<Value>) -> (String, Arc<FakeIndex>) {
    let index = Arc::new(FakeIndex {
        mods: Mutex::new(mods),
        reported_count: Mutex::new(None),
        mode: Mutex::new(Mode::Normal),
        failing_logos: Mutex::new(Vec::new()),
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/v1/mods", get(mods_handler))
        .route("/v1/mods/{id}/logo", get(logo_handler))
        .with_state(Arc::clone(&index));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), index)
}

/// Upstream settings aimed at `base`.
pub fn upstream_settings(base: &str, strategy: FetchStrategy, page_size: u32) -> UpstreamSettings {
    UpstreamSettings {
        api_base_url: base.to_string(),
        fetch_strategy: strategy,
        page_size,
        ..UpstreamSettings::default()
    }
}
