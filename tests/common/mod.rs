//! Shared helpers: an app server on an ephemeral port and a fake Zabbix
//! JSON-RPC frontend built with axum.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use zabbix_map::config::model::{AuthMode, Config, ZabbixConfig};
use zabbix_map::config::ConfigVersion;
use zabbix_map::server::{self, AppState, LoadedConfig};

pub struct Running {
    pub addr: SocketAddr,
    pub shutdown: tokio::sync::oneshot::Sender<()>,
}

impl Running {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn stop(self) {
        let _ = self.shutdown.send(());
    }
}

async fn serve(router: Router) -> Running {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    Running { addr, shutdown }
}

/// Start the API with `config`, building a real Zabbix client when configured.
pub async fn start_app(config: Config) -> (Running, Arc<AppState>) {
    let cors = config.cors.origin.clone();
    let loaded = LoadedConfig::new(config, ConfigVersion::Hash("test-hash".into()), "test");
    let state = Arc::new(AppState::new(loaded, 3000));
    let running = serve(server::build_router(state.clone(), &cors)).await;
    (running, state)
}

pub fn zabbix_config(endpoint: &str, auth_mode: AuthMode, timeout_ms: u64) -> ZabbixConfig {
    ZabbixConfig {
        api_url: Some(endpoint.to_string()),
        auth_token: Some("test-token".into()),
        timeout: timeout_ms,
        accept_invalid_certs: true,
        auth_mode,
    }
}

#[derive(Debug, Clone)]
pub struct Seen {
    pub body: Value,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

/// Canned behaviour of the fake frontend.
#[derive(Debug, Clone)]
pub struct FakeZabbix {
    pub version: &'static str,
    pub hosts: Value,
    pub fail_status: Option<StatusCode>,
    pub reject_token: bool,
    pub drop_result: bool,
    pub delay: Option<Duration>,
}

impl Default for FakeZabbix {
    fn default() -> Self {
        Self {
            version: "7.0.5",
            hosts: sample_hosts(),
            fail_status: None,
            reject_token: false,
            drop_result: false,
            delay: None,
        }
    }
}

struct FakeState {
    behaviour: FakeZabbix,
    seen: Mutex<Vec<Seen>>,
}

pub struct FakeHandle {
    pub running: Running,
    state: Arc<FakeState>,
}

impl FakeHandle {
    pub fn endpoint(&self) -> String {
        self.running.url("/api_jsonrpc.php")
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn stop(self) {
        self.running.stop();
    }
}

pub async fn start_fake_zabbix(behaviour: FakeZabbix) -> FakeHandle {
    let state = Arc::new(FakeState {
        behaviour,
        seen: Mutex::new(Vec::new()),
    });
    let router = Router::new()
        .route("/api_jsonrpc.php", post(rpc))
        .with_state(state.clone());
    FakeHandle {
        running: serve(router).await,
        state,
    }
}

async fn rpc(State(state): State<Arc<FakeState>>, headers: HeaderMap, body: Bytes) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.seen.lock().unwrap().push(Seen {
        body: body.clone(),
        authorization: header("authorization"),
        content_type: header("content-type"),
    });

    let behaviour = &state.behaviour;
    if let Some(delay) = behaviour.delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(status) = behaviour.fail_status {
        return (status, "upstream exploded").into_response();
    }

    let id = body["id"].clone();
    let method = body["method"].as_str().unwrap_or_default();
    let result = match method {
        "apiinfo.version" => json!(behaviour.version),
        "host.get" if behaviour.reject_token => {
            return Json(json!({
                "jsonrpc": "2.0",
                "error": {
                    "code": -32602,
                    "message": "Invalid params.",
                    "data": "Not authorized."
                },
                "id": id
            }))
            .into_response();
        }
        "host.get" if body["params"]["countOutput"] == json!(true) => {
            json!(behaviour.hosts.as_array().map_or(0, Vec::len).to_string())
        }
        "host.get" => behaviour.hosts.clone(),
        other => {
            return Json(json!({
                "jsonrpc": "2.0",
                "error": {"code": -32601, "message": "Method not found.", "data": other},
                "id": id
            }))
            .into_response();
        }
    };

    if behaviour.drop_result {
        return Json(json!({"jsonrpc": "2.0", "id": id})).into_response();
    }
    Json(json!({"jsonrpc": "2.0", "result": result, "id": id})).into_response()
}

/// Three hosts covering the normalizer's main paths.
pub fn sample_hosts() -> Value {
    json!([
        {
            "hostid": "10101",
            "host": "rt-sp-01",
            "name": "aruba-Router-SP.example.com",
            "status": "0",
            "description": "",
            "interfaces": [
                {"ip": "10.0.0.9", "dns": "", "main": "0", "available": "1"},
                {"ip": "10.0.0.1", "dns": "", "main": "1", "available": "1"}
            ],
            "inventory": {
                "location": "Av. Paulista 1000, SP",
                "location_lat": "-23.55",
                "location_lon": "-46.63"
            },
            "hostgroups": [{"groupid": "7", "name": "Routers"}]
        },
        {
            "hostid": "10102",
            "host": "sw-core-01",
            "name": "",
            "status": 1,
            "available": "1",
            "description": "core switch",
            "interfaces": [],
            "inventory": {
                "location": "Filial, RJ",
                "notes": "Site at -22.90, -43.17"
            },
            "hostgroups": [{"groupid": "8", "name": "Switches"}]
        },
        {
            "hostid": "10103",
            "host": "fw-edge",
            "status": "0",
            "interfaces": [
                {"ip": "", "dns": "fw.example.com", "main": 1, "available": "2"}
            ],
            "inventory": []
        }
    ])
}
