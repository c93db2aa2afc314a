//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Config`] for structural
//! errors such as a malformed Zabbix endpoint, an empty token, an
//! out-of-range timeout, or a bad CORS origin. Returns a list of
//! [`ValidationError`] values with per-field suggestions.
//!
//! A config without any Zabbix connection details is valid: the
//! service then serves the built-in example fleet.

use url::Url;

use super::model::Config;
use crate::error::ValidationError;

pub const MAX_TIMEOUT_MS: u64 = 120_000;

/// Validate the Zabbix JSON-RPC endpoint. Returns `Ok(())` or a human-readable error.
pub fn validate_api_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else if parsed.host_str().is_none() {
                Err(format!("'{url}' has no host"))
            } else {
                Ok(())
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

/// Validate a CORS origin: `*` or an `http(s)://host[:port]` origin.
pub fn validate_origin(origin: &str) -> Result<(), String> {
    if origin == "*" {
        return Ok(());
    }
    match Url::parse(origin) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if parsed.path() != "/" || origin.ends_with('/') {
                Err(format!("origin '{origin}' must not carry a path"))
            } else {
                Ok(())
            }
        }
        _ => Err(format!("'{origin}' is not a valid origin")),
    }
}

pub fn validate_timeout(timeout: u64) -> Result<(), String> {
    if timeout == 0 {
        Err("must be greater than 0".into())
    } else if timeout > MAX_TIMEOUT_MS {
        Err(format!("must be at most {MAX_TIMEOUT_MS}ms"))
    } else {
        Ok(())
    }
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let zabbix = &config.zabbix;

    if let Some(ref url) = zabbix.api_url {
        if let Err(msg) = validate_api_url(url) {
            errors.push(ValidationError {
                field: "zabbix.api_url".into(),
                message: msg,
                suggestion: Some("e.g. https://zabbix.example.com/api_jsonrpc.php".into()),
            });
        }
    }

    if zabbix.auth_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
        errors.push(ValidationError {
            field: "zabbix.auth_token".into(),
            message: "token cannot be empty when set".into(),
            suggestion: Some("remove the field to serve example data".into()),
        });
    }

    if let Err(msg) = validate_timeout(zabbix.timeout) {
        errors.push(ValidationError {
            field: "zabbix.timeout".into(),
            message: msg,
            suggestion: Some("values between 5000 and 15000 work well".into()),
        });
    }

    if config.server.ip.trim().is_empty() {
        errors.push(ValidationError {
            field: "server.ip".into(),
            message: "server ip cannot be empty".into(),
            suggestion: Some("omit the field to use 'localhost'".into()),
        });
    }

    if let Err(msg) = validate_origin(&config.cors.origin) {
        errors.push(ValidationError {
            field: "cors.origin".into(),
            message: msg,
            suggestion: Some("use '*' or a bare origin like 'https://map.example.com'".into()),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal findings: a half-configured Zabbix section means the
/// service will serve the example fleet. The missing half may still
/// arrive through the environment, so this is not an error.
#[must_use]
pub fn warnings(config: &Config) -> Vec<String> {
    let zabbix = &config.zabbix;
    match (&zabbix.api_url, &zabbix.auth_token) {
        (Some(_), None) => vec![
            "zabbix.auth_token is not set; example data will be served unless ZABBIX_AUTH_TOKEN is provided".into(),
        ],
        (None, Some(_)) => vec![
            "zabbix.api_url is not set; example data will be served unless ZABBIX_API_URL is provided".into(),
        ],
        _ => Vec::new(),
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &Config) -> String {
    let zabbix = &config.zabbix;
    let endpoint = zabbix.api_url.as_deref().unwrap_or("not set (example data)");
    let token = if zabbix.auth_token.is_some() {
        "set"
    } else {
        "not set"
    };
    let lines = [
        format!("  zabbix:  {endpoint}"),
        format!("    token:   {token}"),
        format!("    timeout: {}ms", zabbix.timeout),
        format!(
            "    tls:     {}",
            if zabbix.accept_invalid_certs {
                "self-signed accepted"
            } else {
                "verified"
            }
        ),
        format!("  server:  {}", config.server.ip),
        format!("  cors:    {}", config.cors.origin),
    ];

    format!("{} is valid\n{}", path, lines.join("\n"))
}
