//! Device listing, lookup and aggregate endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalogue::{self, Source};
use super::{Envelope, ErrorBody};
use crate::device::stats::{summarize_states, DeviceStats, StateSummary};
use crate::device::Device;
use crate::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub count: usize,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<&'static str>,
    pub stats: DeviceStats,
    pub server: ServerMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMeta {
    pub ip: String,
    pub port: u16,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsMeta {
    pub total_devices: usize,
    pub source: Source,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMeta {
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<&'static str>,
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Envelope<Vec<Device>, ListMeta>> {
    let catalogue = catalogue::load(&state).await;
    let server_ip = state.config.read().await.config.server.ip.clone();

    let meta = ListMeta {
        count: catalogue.devices.len(),
        source: catalogue.source,
        fallback_reason: catalogue.fallback_reason,
        stats: DeviceStats::from_devices(&catalogue.devices),
        server: ServerMeta {
            ip: server_ip,
            port: state.port,
            generated_at: catalogue.generated_at,
        },
    };
    Json(Envelope::with_meta(catalogue.devices, meta))
}

pub async fn get_handler(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let catalogue = catalogue::load(&state).await;
    let source = SourceMeta {
        source: catalogue.source,
        fallback_reason: catalogue.fallback_reason,
    };
    match catalogue.devices.into_iter().find(|d| d.id == id) {
        Some(device) => Json(Envelope::with_meta(device, source)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new(
                "Device not found",
                format!("Device with id {id} does not exist"),
            )),
        )
            .into_response(),
    }
}

pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Envelope<DeviceStats, StatsMeta>> {
    let catalogue = catalogue::load(&state).await;
    let meta = StatsMeta {
        total_devices: catalogue.devices.len(),
        source: catalogue.source,
        last_updated: catalogue.generated_at,
    };
    Json(Envelope::with_meta(
        DeviceStats::from_devices(&catalogue.devices),
        meta,
    ))
}

pub async fn states_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Envelope<Vec<StateSummary>, SourceMeta>> {
    let catalogue = catalogue::load(&state).await;
    let meta = SourceMeta {
        source: catalogue.source,
        fallback_reason: catalogue.fallback_reason,
    };
    Json(Envelope::with_meta(summarize_states(&catalogue.devices), meta))
}
