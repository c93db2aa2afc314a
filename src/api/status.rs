//! `GET /api/zabbix/status`: live reachability and token check.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::Envelope;
use crate::server::AppState;
use crate::zabbix::probe::{probe, ProbeReport};

pub async fn zabbix_status_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Envelope<ProbeReport>> {
    let hosts = state.config.read().await.hosts.clone();
    if hosts.is_some() {
        state.stats.zabbix_requests.fetch_add(1, Ordering::Relaxed);
    }
    let report = probe(hosts.as_deref()).await;
    if report.configured && !report.authenticated {
        state.stats.zabbix_failures.fetch_add(1, Ordering::Relaxed);
    }
    Json(Envelope::ok(report))
}
