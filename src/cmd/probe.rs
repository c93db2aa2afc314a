//! `zabbix-map probe`: check Zabbix reachability and the API token.

use crate::cli::ProbeArgs;
use crate::config::ConfigResolver;
use crate::error::ZabbixMapError;
use crate::server::LoadedConfig;
use crate::zabbix::probe::{probe, ProbeReport};

pub async fn execute(args: ProbeArgs) -> Result<(), ZabbixMapError> {
    let resolver =
        ConfigResolver::discover(args.zabbix.config.as_deref(), args.zabbix.overrides()).await?;
    let (config, version) = resolver.load().await?;
    let loaded = LoadedConfig::new(config, version, resolver.source_name());

    let report = probe(loaded.hosts.as_deref()).await;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| ZabbixMapError::Io(e.into()))?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    if report.configured && report.authenticated {
        Ok(())
    } else if !report.configured {
        Err(ZabbixMapError::ZabbixNotConfigured {
            hint: "Provide --api-url and --auth-token, set ZABBIX_API_URL and \
                   ZABBIX_AUTH_TOKEN, or run 'zabbix-map init'."
                .into(),
        })
    } else {
        Err(ZabbixMapError::ProbeFailed {
            reason: report.error.unwrap_or_else(|| "unknown error".into()),
        })
    }
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "\u{2713}"
    } else {
        "\u{2717}"
    }
}

fn print_report(report: &ProbeReport) {
    println!(
        "{} endpoint:      {}",
        mark(report.configured),
        report.api_url.as_deref().unwrap_or("not configured")
    );
    if !report.configured {
        return;
    }
    println!(
        "{} reachable:     {}",
        mark(report.reachable),
        report.api_version.as_deref().map_or_else(
            || "no".to_string(),
            |v| format!("Zabbix API {v}")
        )
    );
    println!(
        "{} authenticated: {}",
        mark(report.authenticated),
        report
            .host_count
            .map_or_else(|| "no".to_string(), |n| format!("{n} hosts visible"))
    );
    if let Some(ref error) = report.error {
        println!("  error: {error}");
    }
}
