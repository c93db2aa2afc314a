//! Fetch-and-normalize with the mock fallback.
//!
//! Any upstream failure, and a missing Zabbix configuration, yields the
//! example fleet flagged `source = "mock"` together with the error kind.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::device::{mock, normalize_at, Device};
use crate::server::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Zabbix,
    Mock,
}

#[derive(Debug, Clone)]
pub struct Catalogue {
    pub devices: Vec<Device>,
    pub source: Source,
    pub fallback_reason: Option<&'static str>,
    pub generated_at: DateTime<Utc>,
}

impl Catalogue {
    fn mock(reason: &'static str, now: DateTime<Utc>) -> Self {
        Self {
            devices: mock::example_fleet(now),
            source: Source::Mock,
            fallback_reason: Some(reason),
            generated_at: now,
        }
    }
}

pub async fn load(state: &Arc<AppState>) -> Catalogue {
    // Release the lock before the upstream call.
    let hosts = state.config.read().await.hosts.clone();
    let now = Utc::now();

    let Some(hosts) = hosts else {
        state.stats.mock_fallbacks.fetch_add(1, Ordering::Relaxed);
        return Catalogue::mock("not_configured", now);
    };

    state.stats.zabbix_requests.fetch_add(1, Ordering::Relaxed);
    match hosts.hosts().await {
        Ok(raw) => {
            let devices: Vec<Device> = raw.iter().map(|h| normalize_at(h, now)).collect();
            tracing::debug!(count = devices.len(), "normalized zabbix hosts");
            Catalogue {
                devices,
                source: Source::Zabbix,
                fallback_reason: None,
                generated_at: now,
            }
        }
        Err(e) => {
            state.stats.zabbix_failures.fetch_add(1, Ordering::Relaxed);
            state.stats.mock_fallbacks.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                error = %e,
                kind = e.kind(),
                endpoint = hosts.endpoint(),
                "zabbix host.get failed, serving example fleet"
            );
            Catalogue::mock(e.kind(), now)
        }
    }
}
