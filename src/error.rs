//! Unified error types for the Zabbix map service.
//!
//! Defines [`ZabbixMapError`] (the main crate error enum) and
//! [`ValidationError`] for config validation failures. Both use
//! `thiserror` for `Display` and `Error` derives. Error messages
//! include contextual hints to guide the user toward a fix.
//!
//! The device normalizer never produces an error; every variant here
//! belongs to configuration, the CLI, or the upstream Zabbix call.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ZabbixMapError {
    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Zabbix is not configured.\n\n  {hint}")]
    ZabbixNotConfigured { hint: String },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Zabbix request timed out after {timeout_ms}ms")]
    ZabbixTimeout { timeout_ms: u64 },

    #[error("Zabbix responded with HTTP {0}")]
    ZabbixStatus(hyper::StatusCode),

    #[error("Zabbix API error {code}: {message} {data}")]
    ZabbixRpc {
        code: i64,
        message: String,
        data: String,
    },

    #[error("Malformed Zabbix response: {reason}")]
    ZabbixMalformed { reason: String },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Zabbix probe failed: {reason}")]
    ProbeFailed { reason: String },

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

impl ZabbixMapError {
    /// Short machine-friendly label, reported as the mock fallback reason.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ZabbixNotConfigured { .. } => "not_configured",
            Self::ZabbixTimeout { .. } => "timeout",
            Self::ZabbixStatus(_) => "http_status",
            Self::ZabbixRpc { .. } => "rpc_error",
            Self::ZabbixMalformed { .. } => "malformed_response",
            Self::HttpRequest { .. } | Self::UriParse { .. } => "transport",
            _ => "internal",
        }
    }
}
