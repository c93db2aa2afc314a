//! Serialize a [`Config`] struct to the chosen output format.

use crate::cli::ConfigFormat;
use crate::config::model::Config;
use crate::error::ZabbixMapError;

const HEADER: &str = "zabbix-map configuration (generated by `zabbix-map init -i`)";

fn to_io(e: impl std::fmt::Display) -> ZabbixMapError {
    ZabbixMapError::Io(std::io::Error::other(e.to_string()))
}

/// Serialize a `Config` in the given format. YAML and TOML get a comment
/// header; JSON has no comment syntax.
pub fn serialize_config(config: &Config, format: &ConfigFormat) -> Result<String, ZabbixMapError> {
    match format {
        #[cfg(feature = "yaml")]
        ConfigFormat::Yaml => serde_yml::to_string(config)
            .map(|body| format!("# {HEADER}\n\n{body}"))
            .map_err(to_io),

        #[cfg(not(feature = "yaml"))]
        ConfigFormat::Yaml => Err(ZabbixMapError::UnsupportedFormat("yaml".into())),

        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map(|body| format!("{body}\n"))
            .map_err(to_io),

        #[cfg(feature = "toml")]
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map(|body| format!("# {HEADER}\n\n{body}"))
            .map_err(to_io),

        #[cfg(not(feature = "toml"))]
        ConfigFormat::Toml => Err(ZabbixMapError::UnsupportedFormat("toml".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ZabbixConfig;

    fn sample() -> Config {
        Config {
            zabbix: ZabbixConfig {
                api_url: Some("https://zabbix.local/api_jsonrpc.php".into()),
                auth_token: Some("abc".into()),
                timeout: 8_000,
                ..ZabbixConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn json_output_reparses() {
        let text = serialize_config(&sample(), &ConfigFormat::Json).unwrap();
        let back: Config = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
        assert!(!text.contains("accept_invalid_certs"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_output_reparses() {
        let text = serialize_config(&sample(), &ConfigFormat::Yaml).unwrap();
        assert!(text.starts_with("# zabbix-map configuration"));
        let back: Config = serde_yml::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }
}
