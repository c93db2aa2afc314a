//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] with the service version, uptime, whether
//! Zabbix is configured, the loaded config source, and cumulative
//! upstream counters. It never calls Zabbix; use `/api/zabbix/status`
//! for a live check.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConfigVersion;
use crate::server::AppState;

pub const SERVICE_NAME: &str = "Zabbix Map API";

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
    pub zabbix: ZabbixHealth,
    pub config: ConfigHealth,
    pub stats: StatsResponse,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZabbixHealth {
    pub configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigHealth {
    pub source: String,
    pub version: String,
    pub loaded_ago_seconds: u64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub zabbix_requests: u64,
    pub zabbix_failures: u64,
    pub mock_fallbacks: u64,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (zabbix, config) = {
        let loaded = state.config.read().await;
        let version = match &loaded.version {
            ConfigVersion::Hash(h) => h.get(..8).unwrap_or(h).to_string(),
            ConfigVersion::Static => "static".to_string(),
        };
        (
            ZabbixHealth {
                configured: loaded.hosts.is_some(),
                api_url: loaded.hosts.as_ref().map(|h| h.endpoint().to_string()),
            },
            ConfigHealth {
                source: loaded.source_name.clone(),
                version,
                loaded_ago_seconds: loaded.loaded_at.elapsed().as_secs(),
            },
        )
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: Utc::now(),
        zabbix,
        config,
        stats: StatsResponse {
            zabbix_requests: state.stats.zabbix_requests.load(Ordering::Relaxed),
            zabbix_failures: state.stats.zabbix_failures.load(Ordering::Relaxed),
            mock_fallbacks: state.stats.mock_fallbacks.load(Ordering::Relaxed),
        },
    })
}
