//! Map-ready device records and everything that produces them.
//!
//! A [`Device`] is the simplified view of a monitored Zabbix host that
//! the map frontend renders: display name, type, status, region code,
//! and a coordinate pair that is always present. Submodules turn raw
//! hosts into devices ([`normalize`]), resolve coordinates ([`geo`]),
//! aggregate counters ([`stats`]), and provide the example fleet served
//! when Zabbix cannot be reached ([`mock`]).

pub mod geo;
pub mod mock;
pub mod normalize;
pub mod stats;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use normalize::{normalize, normalize_at};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    Server,
    Router,
    Switch,
    Firewall,
    LoadBalancer,
}

impl DeviceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Router => "router",
            Self::Switch => "switch",
            Self::Firewall => "firewall",
            Self::LoadBalancer => "load-balancer",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Warning,
    Offline,
}

impl DeviceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Warning => "warning",
            Self::Offline => "offline",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub original_name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    /// Two-letter region code.
    pub state: String,
    pub location: String,
    pub ip: String,
    pub lat: f64,
    pub lon: f64,
    pub has_exact_coordinates: bool,
    pub last_checked_at: DateTime<Utc>,
    pub groups: Vec<String>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_wire_names() {
        assert_eq!(
            serde_json::to_value(DeviceType::LoadBalancer).unwrap(),
            "load-balancer"
        );
        assert_eq!(serde_json::to_value(DeviceStatus::Warning).unwrap(), "warning");
        assert_eq!(DeviceType::LoadBalancer.to_string(), "load-balancer");
    }

    #[test]
    fn device_serializes_camel_case() {
        let device = Device {
            id: "10084".into(),
            name: "Core".into(),
            original_name: "rt-core".into(),
            device_type: DeviceType::Router,
            status: DeviceStatus::Online,
            state: "SP".into(),
            location: "Matriz, SP".into(),
            ip: "10.0.0.1".into(),
            lat: -23.5505,
            lon: -46.6333,
            has_exact_coordinates: false,
            last_checked_at: DateTime::from_timestamp(0, 0).unwrap(),
            groups: vec!["Routers".into()],
            description: String::new(),
        };
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["originalName"], "rt-core");
        assert_eq!(json["type"], "router");
        assert_eq!(json["hasExactCoordinates"], false);
        assert_eq!(json["lastCheckedAt"], "1970-01-01T00:00:00Z");
    }
}
