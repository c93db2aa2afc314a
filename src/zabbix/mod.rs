//! Zabbix JSON-RPC integration.
//!
//! [`client::ZabbixClient`] speaks the wire protocol; everything above it
//! (the REST handlers, the `probe` subcommand) goes through the
//! [`HostSource`] trait so tests can swap in a canned fleet.

pub mod client;
pub mod model;
pub mod probe;
pub mod tls;

use async_trait::async_trait;

use crate::error::ZabbixMapError;
use model::RawHost;

pub use client::ZabbixClient;

// Held as Arc<dyn HostSource> in the shared state, hence async_trait.
#[async_trait]
pub trait HostSource: Send + Sync + std::fmt::Debug {
    /// Endpoint shown in `/health` and status reports.
    fn endpoint(&self) -> &str;

    /// `apiinfo.version`; never authenticated.
    async fn api_version(&self) -> Result<String, ZabbixMapError>;

    /// Every host with interfaces, inventory and groups.
    async fn hosts(&self) -> Result<Vec<RawHost>, ZabbixMapError>;

    /// Number of hosts visible to the token.
    async fn host_count(&self) -> Result<u64, ZabbixMapError>;
}
