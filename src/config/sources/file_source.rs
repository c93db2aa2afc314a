//! Async file-based config source with SHA256 change detection.
//!
//! [`FileSource`] implements [`ConfigSource`] for every supported file
//! format, picking the parser from the file extension. It reads the
//! file asynchronously via Tokio, validates the result, and computes a
//! SHA256 hash for version tracking.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{extension, parse_config_str, sha256_hex};
use crate::config::model::Config;
use crate::config::validation::validate;
use crate::config::{ConfigSource, ConfigVersion};
use crate::error::ZabbixMapError;

pub struct FileSource {
    path: PathBuf,
    format: &'static str,
}

impl FileSource {
    /// Build a source for `path`, rejecting extensions this build cannot parse.
    pub fn new(path: PathBuf) -> Result<Self, ZabbixMapError> {
        let format = match extension(&path) {
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => "yaml",
            #[cfg(feature = "json")]
            "json" => "json",
            #[cfg(feature = "toml")]
            "toml" => "toml",
            other => return Err(ZabbixMapError::UnsupportedFormat(other.to_string())),
        };
        Ok(Self { path, format })
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn read_content(&self) -> Result<String, ZabbixMapError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ZabbixMapError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                ZabbixMapError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.format
    }

    async fn load(&self) -> Result<(Config, ConfigVersion), ZabbixMapError> {
        let content = self.read_content().await?;

        let config = parse_config_str(
            extension(&self.path),
            &content,
            &self.path.display().to_string(),
        )?;

        if let Err(errors) = validate(&config) {
            return Err(ZabbixMapError::ConfigValidation { errors });
        }

        let hash = sha256_hex(content.as_bytes());
        Ok((config, ConfigVersion::Hash(hash)))
    }

    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ZabbixMapError> {
        let content = self.read_content().await?;
        let hash = sha256_hex(content.as_bytes());
        Ok(*current != ConfigVersion::Hash(hash))
    }
}
