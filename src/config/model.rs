//! Serde data structures for the service configuration file.
//!
//! Contains [`Config`] (the root), [`ZabbixConfig`], [`ServerConfig`],
//! and [`CorsConfig`]. All types derive `Serialize` and `Deserialize`
//! with `deny_unknown_fields` for strict parsing.

use serde::{Deserialize, Serialize};

const fn default_timeout() -> u64 {
    10_000
}

const fn default_true() -> bool {
    true
}

fn default_server_ip() -> String {
    "localhost".to_string()
}

fn default_origin() -> String {
    "*".to_string()
}

fn is_default_timeout(v: &u64) -> bool {
    *v == default_timeout()
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_default_server_ip(v: &str) -> bool {
    v == "localhost"
}

fn is_default_origin(v: &str) -> bool {
    v == "*"
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "ZabbixConfig::is_default")]
    pub zabbix: ZabbixConfig,

    #[serde(default, skip_serializing_if = "ServerConfig::is_default")]
    pub server: ServerConfig,

    #[serde(default, skip_serializing_if = "CorsConfig::is_default")]
    pub cors: CorsConfig,
}

impl Config {
    /// True when both the API URL and the token are present.
    #[must_use]
    pub fn zabbix_configured(&self) -> bool {
        self.zabbix.api_url.as_deref().is_some_and(|u| !u.is_empty())
            && self.zabbix.auth_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Token travels in the JSON-RPC `auth` member.
    #[default]
    Envelope,
    /// Token travels as `Authorization: Bearer <token>`.
    Header,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZabbixConfig {
    /// Full JSON-RPC endpoint, e.g. `https://zabbix.local/api_jsonrpc.php`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Upstream timeout in milliseconds.
    #[serde(
        default = "default_timeout",
        skip_serializing_if = "is_default_timeout"
    )]
    pub timeout: u64,

    /// Tolerate self-signed certificates on the Zabbix frontend.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub accept_invalid_certs: bool,

    #[serde(default, skip_serializing_if = "AuthMode::is_default")]
    pub auth_mode: AuthMode,
}

impl AuthMode {
    fn is_default(&self) -> bool {
        *self == Self::Envelope
    }
}

impl Default for ZabbixConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            auth_token: None,
            timeout: default_timeout(),
            accept_invalid_certs: default_true(),
            auth_mode: AuthMode::default(),
        }
    }
}

impl ZabbixConfig {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address advertised in `meta.server` of device listings.
    #[serde(
        default = "default_server_ip",
        skip_serializing_if = "is_default_server_ip"
    )]
    pub ip: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: default_server_ip(),
        }
    }
}

impl ServerConfig {
    fn is_default(&self) -> bool {
        is_default_server_ip(&self.ip)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default = "default_origin", skip_serializing_if = "is_default_origin")]
    pub origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

impl CorsConfig {
    fn is_default(&self) -> bool {
        is_default_origin(&self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.zabbix.timeout, 10_000);
        assert!(config.zabbix.accept_invalid_certs);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.cors.origin, "*");
        assert!(!config.zabbix_configured());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"zabbix": {"url": "x"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn configured_requires_url_and_token() {
        let mut config = Config::default();
        config.zabbix.api_url = Some("https://zbx/api_jsonrpc.php".into());
        assert!(!config.zabbix_configured());
        config.zabbix.auth_token = Some(String::new());
        assert!(!config.zabbix_configured());
        config.zabbix.auth_token = Some("abc".into());
        assert!(config.zabbix_configured());
    }

    #[test]
    fn defaults_are_omitted_when_serialized() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn auth_mode_is_lowercase() {
        let config: Config =
            serde_json::from_str(r#"{"zabbix": {"auth_mode": "header"}}"#).unwrap();
        assert_eq!(config.zabbix.auth_mode, AuthMode::Header);
    }
}
