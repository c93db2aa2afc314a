//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Config files are YAML by default, with JSON and TOML gated behind
//! feature flags. [`parse_config_str`] handles format-specific
//! deserialization and [`auto_detect`] looks for a config file in the
//! working directory.

pub mod file_source;

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::model::Config;
use crate::error::ZabbixMapError;

/// File names probed, in order, when no `--config` is given.
pub const CANDIDATES: &[&str] = &[
    "zabbix-map.yaml",
    "zabbix-map.yml",
    "zabbix-map.json",
    "zabbix-map.toml",
];

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, ZabbixMapError> {
    let parse_err = |e: Box<dyn std::error::Error + Send + Sync>| ZabbixMapError::ConfigParse {
        path: path_display.to_string(),
        source: e,
    };

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| parse_err(Box::new(e))),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| parse_err(Box::new(e))),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| parse_err(Box::new(e))),

        other => Err(ZabbixMapError::UnsupportedFormat(other.to_string())),
    }
}

/// Extension of `path`, or an empty string.
#[must_use]
pub fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// First candidate file that exists in the working directory.
pub async fn auto_detect() -> Option<PathBuf> {
    for name in CANDIDATES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return Some(path);
        }
    }
    None
}
