//! Configuration loading, validation, and hot-reloading.
//!
//! Defines the [`ConfigSource`] trait for pluggable config backends, the
//! [`ConfigResolver`] that layers overrides on top of the file, and the
//! [`ConfigVersion`] enum for change detection. Submodules provide the
//! data model, validation logic, and concrete file sources.
//!
//! The resolved [`Config`] is always an explicit value handed to the
//! service at construction; command-line and environment overrides are
//! layered on top with [`Overrides::apply`].

pub mod model;
pub mod sources;
pub mod validation;

use std::path::Path;

use async_trait::async_trait;

use crate::error::ZabbixMapError;
use model::Config;
use sources::file_source::FileSource;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
    /// Config assembled from flags and environment only.
    Static,
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(Config, ConfigVersion), ZabbixMapError>;
    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ZabbixMapError>;
}

/// Values supplied on the command line or through the environment.
/// Each `Some` wins over the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
    pub server_ip: Option<String>,
    pub cors_origin: Option<String>,
    pub timeout: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref url) = self.api_url {
            config.zabbix.api_url = Some(url.clone());
        }
        if let Some(ref token) = self.auth_token {
            config.zabbix.auth_token = Some(token.clone());
        }
        if let Some(ref ip) = self.server_ip {
            config.server.ip.clone_from(ip);
        }
        if let Some(ref origin) = self.cors_origin {
            config.cors.origin.clone_from(origin);
        }
        if let Some(timeout) = self.timeout {
            config.zabbix.timeout = timeout;
        }
        if let Some(accept) = self.accept_invalid_certs {
            config.zabbix.accept_invalid_certs = accept;
        }
    }
}

/// Optional file source plus the overrides applied on every load.
pub struct ConfigResolver {
    source: Option<Box<dyn ConfigSource>>,
    overrides: Overrides,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(source: Option<Box<dyn ConfigSource>>, overrides: Overrides) -> Self {
        Self { source, overrides }
    }

    /// Use `explicit` when given, else the first auto-detected file, else
    /// overrides alone.
    pub async fn discover(
        explicit: Option<&Path>,
        overrides: Overrides,
    ) -> Result<Self, ZabbixMapError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => sources::auto_detect().await,
        };
        let source = match path {
            Some(path) => Some(Box::new(FileSource::new(path)?) as Box<dyn ConfigSource>),
            None => None,
        };
        Ok(Self::new(source, overrides))
    }

    pub async fn load(&self) -> Result<(Config, ConfigVersion), ZabbixMapError> {
        let (mut config, version) = match self.source {
            Some(ref source) => source.load().await?,
            None => (Config::default(), ConfigVersion::Static),
        };
        self.overrides.apply(&mut config);
        validation::validate(&config)
            .map_err(|errors| ZabbixMapError::ConfigValidation { errors })?;
        Ok((config, version))
    }

    pub async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ZabbixMapError> {
        match self.source {
            Some(ref source) => source.has_changed(current).await,
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.as_ref().map_or("environment", |s| s.name())
    }

    #[must_use]
    pub const fn watches_file(&self) -> bool {
        self.source.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Config);

    #[async_trait]
    impl ConfigSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn load(&self) -> Result<(Config, ConfigVersion), ZabbixMapError> {
            Ok((self.0.clone(), ConfigVersion::Hash("abc".into())))
        }

        async fn has_changed(&self, _current: &ConfigVersion) -> Result<bool, ZabbixMapError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn resolver_without_file_uses_overrides() {
        let resolver = ConfigResolver::new(
            None,
            Overrides {
                server_ip: Some("192.0.2.7".into()),
                ..Overrides::default()
            },
        );
        let (config, version) = resolver.load().await.unwrap();
        assert_eq!(config.server.ip, "192.0.2.7");
        assert_eq!(version, ConfigVersion::Static);
        assert_eq!(resolver.source_name(), "environment");
        assert!(!resolver.watches_file());
        assert!(!resolver.has_changed(&version).await.unwrap());
    }

    #[tokio::test]
    async fn resolver_validates_after_overrides() {
        let resolver = ConfigResolver::new(
            Some(Box::new(Fixed(Config::default()))),
            Overrides {
                api_url: Some("not a url".into()),
                ..Overrides::default()
            },
        );
        let err = resolver.load().await.unwrap_err();
        assert!(matches!(err, ZabbixMapError::ConfigValidation { .. }));
        assert_eq!(resolver.source_name(), "fixed");
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        config.zabbix.api_url = Some("https://file/api_jsonrpc.php".into());
        config.server.ip = "10.0.0.1".into();

        let overrides = Overrides {
            api_url: Some("https://env/api_jsonrpc.php".into()),
            auth_token: Some("token".into()),
            timeout: Some(5_000),
            ..Overrides::default()
        };
        overrides.apply(&mut config);

        assert_eq!(
            config.zabbix.api_url.as_deref(),
            Some("https://env/api_jsonrpc.php")
        );
        assert_eq!(config.zabbix.auth_token.as_deref(), Some("token"));
        assert_eq!(config.zabbix.timeout, 5_000);
        assert_eq!(config.server.ip, "10.0.0.1");
        assert_eq!(config.cors.origin, "*");
    }
}
