//! Connectivity report for a Zabbix frontend.
//!
//! Backs both `GET /api/zabbix/status` and the `probe` subcommand. The
//! probe never fails: every problem ends up in [`ProbeReport::error`].

use serde::{Deserialize, Serialize};

use super::HostSource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub configured: bool,
    pub reachable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Check reachability (`apiinfo.version`), then the token (`host.get` count).
pub async fn probe(source: Option<&dyn HostSource>) -> ProbeReport {
    let Some(source) = source else {
        return ProbeReport {
            error: Some("Zabbix API URL and auth token are not configured".into()),
            ..ProbeReport::default()
        };
    };

    let mut report = ProbeReport {
        configured: true,
        api_url: Some(source.endpoint().to_string()),
        ..ProbeReport::default()
    };

    match source.api_version().await {
        Ok(version) => {
            report.reachable = true;
            report.api_version = Some(version);
        }
        Err(e) => {
            tracing::warn!(error = %e, "zabbix unreachable");
            report.error = Some(e.to_string());
            return report;
        }
    }

    match source.host_count().await {
        Ok(count) => {
            report.authenticated = true;
            report.host_count = Some(count);
        }
        Err(e) => {
            tracing::warn!(error = %e, "zabbix rejected the token");
            report.error = Some(e.to_string());
        }
    }
    report
}
