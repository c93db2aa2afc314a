//! Host-to-device normalization.
//!
//! [`normalize`] is a total function: whatever shape a Zabbix host
//! arrives in, it yields a [`Device`] with a cleaned name, a region
//! code, a type, a status, an address and coordinates. Missing or
//! malformed fields degrade to defaults instead of failing.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::geo::{self, DEFAULT_STATE};
use super::{Device, DeviceStatus, DeviceType};
use crate::zabbix::model::{HostInterface, HostStatus, Inventory, RawHost};

pub const UNKNOWN_LOCATION: &str = "Location not defined";
pub const UNKNOWN_IP: &str = "N/A";

static VENDOR_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(aruba-|router-|rt-|ap-)").expect("vendor prefix pattern")
});

/// Keyword table scanned against group names and the host name, in priority order.
const TYPE_KEYWORDS: &[(&str, DeviceType)] = &[
    ("load-balancer", DeviceType::LoadBalancer),
    ("loadbalancer", DeviceType::LoadBalancer),
    ("load balancer", DeviceType::LoadBalancer),
    ("firewall", DeviceType::Firewall),
    ("router", DeviceType::Router),
    ("switch", DeviceType::Switch),
    ("server", DeviceType::Server),
];

/// Host name prefixes used by the fleet's naming convention.
const TYPE_PREFIXES: &[(&str, DeviceType)] = &[
    ("lb-", DeviceType::LoadBalancer),
    ("fw-", DeviceType::Firewall),
    ("rt-", DeviceType::Router),
    ("aruba-", DeviceType::Router),
    ("sw-", DeviceType::Switch),
    ("srv-", DeviceType::Server),
];

/// Normalize a host, stamping it with the current time.
#[must_use]
pub fn normalize(host: &RawHost) -> Device {
    normalize_at(host, Utc::now())
}

/// Normalize a host as of `checked_at`.
#[must_use]
pub fn normalize_at(host: &RawHost, checked_at: DateTime<Utc>) -> Device {
    let original_name = display_name(host);
    let name = clean_name(&original_name);
    let location = resolve_location(&host.inventory);
    let state = geo::region_code(&location).unwrap_or(DEFAULT_STATE).to_string();
    let (coordinates, source) = geo::resolve(&host.inventory, &host.description, &state);
    let groups: Vec<String> = host.groups.iter().map(|g| g.name.clone()).collect();

    Device {
        id: host.host_id.clone(),
        device_type: classify_type(&groups, &original_name),
        status: classify_status(host.status, host.available.as_deref()),
        ip: resolve_ip(&host.interfaces),
        name,
        original_name,
        state,
        location,
        lat: coordinates.lat,
        lon: coordinates.lon,
        has_exact_coordinates: source.is_exact(),
        last_checked_at: checked_at,
        groups,
        description: host.description.clone(),
    }
}

/// `name` when set, else the technical `host` field.
fn display_name(host: &RawHost) -> String {
    let name = host.name.trim();
    if name.is_empty() {
        host.host.trim().to_string()
    } else {
        name.to_string()
    }
}

/// Drop the domain suffix, then a vendor/role prefix, then capitalize.
#[must_use]
pub fn clean_name(raw: &str) -> String {
    let short = raw.split('.').next().unwrap_or(raw);
    let stripped = VENDOR_PREFIX.replace(short, "");
    let base = if stripped.is_empty() {
        short
    } else {
        &*stripped
    };
    capitalize(base)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// First non-empty of location and the three site address lines.
#[must_use]
pub fn resolve_location(inventory: &Inventory) -> String {
    [
        &inventory.location,
        &inventory.site_address_a,
        &inventory.site_address_b,
        &inventory.site_address_c,
    ]
    .into_iter()
    .filter_map(|field| field.as_deref().map(str::trim))
    .find(|value| !value.is_empty())
    .map_or_else(|| UNKNOWN_LOCATION.to_string(), str::to_string)
}

/// Keyword classification: group names first, then the host name.
#[must_use]
pub fn classify_type(groups: &[String], name: &str) -> DeviceType {
    let lowered_name = name.to_lowercase();
    groups
        .iter()
        .map(|g| g.to_lowercase())
        .chain(std::iter::once(lowered_name.clone()))
        .find_map(|haystack| {
            TYPE_KEYWORDS
                .iter()
                .find(|(keyword, _)| haystack.contains(keyword))
                .map(|(_, kind)| *kind)
        })
        .or_else(|| {
            TYPE_PREFIXES
                .iter()
                .find(|(prefix, _)| lowered_name.starts_with(prefix))
                .map(|(_, kind)| *kind)
        })
        .unwrap_or(DeviceType::Server)
}

/// Disabled hosts are offline; explicitly unavailable ones are a warning.
#[must_use]
pub fn classify_status(status: HostStatus, available: Option<&str>) -> DeviceStatus {
    if status == HostStatus::Disabled {
        DeviceStatus::Offline
    } else if available.map(str::trim) == Some("0") {
        DeviceStatus::Warning
    } else {
        DeviceStatus::Online
    }
}

/// Address of the main interface, else the first one, else `N/A`.
#[must_use]
pub fn resolve_ip(interfaces: &[HostInterface]) -> String {
    interfaces
        .iter()
        .find(|i| i.is_main)
        .or_else(|| interfaces.first())
        .and_then(|i| {
            [i.ip.trim(), i.dns.trim()]
                .into_iter()
                .find(|addr| !addr.is_empty())
        })
        .map_or_else(|| UNKNOWN_IP.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::geo::DEFAULT_POINT;
    use crate::zabbix::model::HostGroup;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn host(name: &str) -> RawHost {
        RawHost {
            host_id: "10084".into(),
            host: "fallback-host".into(),
            name: name.into(),
            ..RawHost::default()
        }
    }

    fn interface(ip: &str, is_main: bool) -> HostInterface {
        HostInterface {
            ip: ip.into(),
            dns: String::new(),
            is_main,
            available: None,
        }
    }

    #[test]
    fn name_cleaning_order() {
        assert_eq!(clean_name("aruba-Router-SP.example.com"), "Router-sp");
        assert_eq!(clean_name("rt-core-01.example.com"), "Core-01");
        assert_eq!(clean_name("AP-Lobby"), "Lobby");
        assert_eq!(clean_name("switch01"), "Switch01");
        assert_eq!(clean_name(""), "");
    }

    #[test]
    fn name_cleaning_is_stable_on_clean_names() {
        for raw in ["rt-core-01.example.com", "srv-db.local", "Campinas"] {
            let once = clean_name(raw);
            assert_eq!(clean_name(&once), once, "{raw}");
        }
    }

    #[test]
    fn prefix_only_name_keeps_prefix() {
        assert_eq!(clean_name("rt-.lan"), "Rt-");
    }

    #[test]
    fn host_field_used_when_name_empty() {
        let mut h = host("  ");
        h.host = "rt-bh-01.corp".into();
        let device = normalize(&h);
        assert_eq!(device.original_name, "rt-bh-01.corp");
        assert_eq!(device.name, "Bh-01");
    }

    #[test]
    fn location_precedence() {
        let inv = Inventory {
            location: Some(" ".into()),
            site_address_a: None,
            site_address_b: Some("Rua B, MG".into()),
            site_address_c: Some("Rua C, BA".into()),
            ..Inventory::default()
        };
        assert_eq!(resolve_location(&inv), "Rua B, MG");
        assert_eq!(resolve_location(&Inventory::default()), UNKNOWN_LOCATION);
    }

    #[test]
    fn exact_inventory_coordinates() {
        let mut h = host("rt-sp");
        h.inventory.location_lat = Some("-23.55".into());
        h.inventory.location_lon = Some("-46.63".into());
        let device = normalize(&h);
        assert!(device.has_exact_coordinates);
        assert!(approx(device.lat, -23.55));
        assert!(approx(device.lon, -46.63));
    }

    #[test]
    fn notes_coordinates_are_approximate() {
        let mut h = host("rt-rj");
        h.inventory.notes = Some("Site at -22.90, -43.17".into());
        let device = normalize(&h);
        assert!(!device.has_exact_coordinates);
        assert!(approx(device.lat, -22.90));
        assert!(approx(device.lon, -43.17));
    }

    #[test]
    fn region_table_fallback() {
        let mut h = host("rt-rj");
        h.inventory.location = Some("Filial, RJ".into());
        let device = normalize(&h);
        assert_eq!(device.state, "RJ");
        assert!(approx(device.lat, -22.9068));
        assert!(approx(device.lon, -43.1729));
        assert!(!device.has_exact_coordinates);
    }

    #[test]
    fn default_state_and_point() {
        let mut h = host("rt-x");
        h.inventory.location = Some("Galpão central".into());
        let device = normalize(&h);
        assert_eq!(device.state, "SP");
        assert_eq!(device.location, "Galpão central");
        assert!(approx(device.lat, DEFAULT_POINT.lat));
        assert!(approx(device.lon, DEFAULT_POINT.lon));
    }

    #[test]
    fn unknown_region_code_uses_default_point() {
        let mut h = host("rt-x");
        h.inventory.location = Some("Buenos Aires, AR".into());
        let device = normalize(&h);
        assert_eq!(device.state, "AR");
        assert!(approx(device.lat, DEFAULT_POINT.lat));
    }

    #[test]
    fn coordinates_always_finite() {
        let mut h = host("");
        h.host = String::new();
        h.inventory.location_lat = Some("NaN".into());
        h.inventory.location_lon = Some("inf".into());
        h.inventory.notes = Some("1e999, 1e999".into());
        let device = normalize(&h);
        assert!(device.lat.is_finite() && device.lon.is_finite());
        assert!(!device.has_exact_coordinates);
    }

    #[test]
    fn disabled_is_always_offline() {
        for available in [None, Some("0"), Some("1"), Some("2")] {
            assert_eq!(
                classify_status(HostStatus::Disabled, available),
                DeviceStatus::Offline
            );
        }
    }

    #[test]
    fn availability_maps_to_status() {
        assert_eq!(
            classify_status(HostStatus::Active, Some("0")),
            DeviceStatus::Warning
        );
        assert_eq!(
            classify_status(HostStatus::Active, Some("1")),
            DeviceStatus::Online
        );
        assert_eq!(classify_status(HostStatus::Active, None), DeviceStatus::Online);
    }

    #[test]
    fn ip_resolution() {
        assert_eq!(
            resolve_ip(&[interface("10.0.0.2", false), interface("10.0.0.1", true)]),
            "10.0.0.1"
        );
        assert_eq!(resolve_ip(&[interface("10.0.0.2", false)]), "10.0.0.2");
        assert_eq!(resolve_ip(&[]), UNKNOWN_IP);

        let dns_only = HostInterface {
            ip: String::new(),
            dns: "rt.example.com".into(),
            is_main: true,
            available: None,
        };
        assert_eq!(resolve_ip(&[dns_only]), "rt.example.com");
    }

    #[test]
    fn type_from_groups_then_name() {
        let groups = vec!["Linux servers".to_string(), "Core Firewalls".to_string()];
        assert_eq!(classify_type(&groups, "rt-sp"), DeviceType::Server);
        assert_eq!(classify_type(&[], "edge-switch-3"), DeviceType::Switch);
        assert_eq!(classify_type(&[], "LB-front"), DeviceType::LoadBalancer);
        assert_eq!(classify_type(&[], "rt-sp-01"), DeviceType::Router);
        assert_eq!(classify_type(&[], "aruba-Router-SP"), DeviceType::Router);
        assert_eq!(classify_type(&[], "printer"), DeviceType::Server);
    }

    #[test]
    fn full_host() {
        let h = RawHost {
            host_id: "10501".into(),
            host: "rt-poa-01".into(),
            name: "aruba-Router-POA.example.com".into(),
            status: HostStatus::Active,
            available: Some("0".into()),
            description: "Borda".into(),
            interfaces: vec![interface("172.16.0.1", true)],
            inventory: Inventory {
                location: Some("Porto Alegre, RS".into()),
                ..Inventory::default()
            },
            groups: vec![HostGroup {
                group_id: "12".into(),
                name: "Routers".into(),
            }],
        };
        let checked_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let device = normalize_at(&h, checked_at);

        assert_eq!(device.id, "10501");
        assert_eq!(device.name, "Router-poa");
        assert_eq!(device.original_name, "aruba-Router-POA.example.com");
        assert_eq!(device.device_type, DeviceType::Router);
        assert_eq!(device.status, DeviceStatus::Warning);
        assert_eq!(device.state, "RS");
        assert_eq!(device.ip, "172.16.0.1");
        assert!(approx(device.lat, -30.0346));
        assert_eq!(device.groups, vec!["Routers".to_string()]);
        assert_eq!(device.last_checked_at, checked_at);
        assert_eq!(device.description, "Borda");
    }
}
