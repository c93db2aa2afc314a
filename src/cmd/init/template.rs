//! Commented starter configs for `zabbix-map init`.
//!
//! The templates leave the Zabbix credentials commented out, so a fresh
//! install serves the example fleet until they are filled in.

use std::path::PathBuf;

use console::style;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::ZabbixMapError;

const YAML: &str = r#"# zabbix-map configuration
#
# Without api_url and auth_token the service serves a built-in example
# fleet. ZABBIX_API_URL and ZABBIX_AUTH_TOKEN override the values below.

zabbix:
  # api_url: https://zabbix.example.com/api_jsonrpc.php
  # auth_token: your-api-token
  timeout: 10000             # milliseconds, 1..=120000
  accept_invalid_certs: true # tolerate self-signed frontends
  auth_mode: envelope        # envelope (JSON-RPC auth field) or header (Bearer)

server:
  ip: localhost              # reported in meta.server of /api/devices

cors:
  origin: "*"                # or https://map.example.com
"#;

const TOML: &str = r#"# zabbix-map configuration
#
# Without api_url and auth_token the service serves a built-in example
# fleet. ZABBIX_API_URL and ZABBIX_AUTH_TOKEN override the values below.

[zabbix]
# api_url = "https://zabbix.example.com/api_jsonrpc.php"
# auth_token = "your-api-token"
timeout = 10000
accept_invalid_certs = true
auth_mode = "envelope"

[server]
ip = "localhost"

[cors]
origin = "*"
"#;

const JSON: &str = r#"{
  "zabbix": {
    "timeout": 10000,
    "accept_invalid_certs": true,
    "auth_mode": "envelope"
  },
  "server": {
    "ip": "localhost"
  },
  "cors": {
    "origin": "*"
  }
}
"#;

#[must_use]
pub const fn template(format: &ConfigFormat) -> &'static str {
    match format {
        ConfigFormat::Yaml => YAML,
        ConfigFormat::Json => JSON,
        ConfigFormat::Toml => TOML,
    }
}

pub fn run(args: &InitArgs) -> Result<(), ZabbixMapError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("zabbix-map.{}", args.format.extension())));

    if output.exists() {
        return Err(ZabbixMapError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format))?;

    println!("{} Created {}", style("✓").green().bold(), output.display());
    println!("\n  Next steps:");
    println!("    1. Set zabbix.api_url and zabbix.auth_token (or ZABBIX_API_URL / ZABBIX_AUTH_TOKEN)");
    println!("    2. zabbix-map probe -c {}", output.display());
    println!("    3. zabbix-map run -c {}", output.display());
    Ok(())
}
