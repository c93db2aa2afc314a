//! REST handlers for the map frontend.
//!
//! Every JSON response uses the same envelope: `{success, data, meta?}` on
//! success and `{success: false, error, message}` on failure.

pub mod catalogue;
pub mod devices;
pub mod status;

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T, M = ()> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
}

impl<T> Envelope<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }
}

impl<T, M> Envelope<T, M> {
    pub const fn with_meta(data: T, meta: M) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            available_endpoints: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        path: "/",
        method: "GET",
        description: "This documentation",
    },
    Endpoint {
        path: "/health",
        method: "GET",
        description: "Service health and counters",
    },
    Endpoint {
        path: "/api/devices",
        method: "GET",
        description: "All devices with coordinates and status",
    },
    Endpoint {
        path: "/api/devices/{id}",
        method: "GET",
        description: "One device by id",
    },
    Endpoint {
        path: "/api/stats",
        method: "GET",
        description: "Counts by status, type and state",
    },
    Endpoint {
        path: "/api/states",
        method: "GET",
        description: "Per-state summary placed at the state capital",
    },
    Endpoint {
        path: "/api/zabbix/status",
        method: "GET",
        description: "Zabbix reachability and token check",
    },
];

#[derive(Debug, Serialize)]
pub struct Docs {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub build: BuildInfo,
    pub endpoints: &'static [Endpoint],
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub commit: &'static str,
    pub profile: &'static str,
}

pub async fn docs_handler() -> Json<Docs> {
    Json(Docs {
        name: "Zabbix Map API",
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
        build: BuildInfo {
            commit: env!("ZABBIX_MAP_GIT_SHORT"),
            profile: env!("ZABBIX_MAP_BUILD_PROFILE"),
        },
        endpoints: ENDPOINTS,
    })
}

pub async fn not_found_handler(method: Method, uri: Uri) -> Response {
    tracing::debug!(%method, %uri, "no route");
    let mut body = ErrorBody::new(
        "Endpoint not found",
        format!("Route {method} {} does not exist", uri.path()),
    );
    body.available_endpoints = Some(
        ENDPOINTS
            .iter()
            .map(|e| format!("{} {}", e.method, e.path))
            .collect(),
    );
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
