//! Example fleet served whenever Zabbix is unconfigured or unreachable.
//!
//! The map must always have something to draw; these six devices cover
//! every status and most device types across Brazilian regions.

use chrono::{DateTime, Utc};

use super::{Device, DeviceStatus, DeviceType};

struct Entry {
    id: &'static str,
    name: &'static str,
    host: &'static str,
    device_type: DeviceType,
    status: DeviceStatus,
    state: &'static str,
    city: &'static str,
    ip: &'static str,
    lat: f64,
    lon: f64,
    group: &'static str,
    description: &'static str,
}

const FLEET: &[Entry] = &[
    Entry {
        id: "1",
        name: "Servidor Principal SP",
        host: "srv-sp-01",
        device_type: DeviceType::Server,
        status: DeviceStatus::Online,
        state: "SP",
        city: "São Paulo",
        ip: "192.168.1.100",
        lat: -23.5505,
        lon: -46.6333,
        group: "Servers",
        description: "Servidor de aplicação principal",
    },
    Entry {
        id: "2",
        name: "Router Matriz RJ",
        host: "rt-rj-01",
        device_type: DeviceType::Router,
        status: DeviceStatus::Online,
        state: "RJ",
        city: "Rio de Janeiro",
        ip: "192.168.2.1",
        lat: -22.9068,
        lon: -43.1729,
        group: "Routers",
        description: "Router principal da matriz",
    },
    Entry {
        id: "3",
        name: "Switch Datacenter BH",
        host: "sw-bh-01",
        device_type: DeviceType::Switch,
        status: DeviceStatus::Warning,
        state: "MG",
        city: "Belo Horizonte",
        ip: "192.168.3.10",
        lat: -19.9167,
        lon: -43.9345,
        group: "Switches",
        description: "Switch do datacenter",
    },
    Entry {
        id: "4",
        name: "Firewall Nacional DF",
        host: "fw-df-01",
        device_type: DeviceType::Firewall,
        status: DeviceStatus::Online,
        state: "DF",
        city: "Brasília",
        ip: "192.168.4.1",
        lat: -15.7801,
        lon: -47.9292,
        group: "Firewalls",
        description: "Firewall principal",
    },
    Entry {
        id: "5",
        name: "Servidor Regional POA",
        host: "srv-poa-01",
        device_type: DeviceType::Server,
        status: DeviceStatus::Offline,
        state: "RS",
        city: "Porto Alegre",
        ip: "192.168.5.100",
        lat: -30.0346,
        lon: -51.2177,
        group: "Servers",
        description: "Servidor regional",
    },
    Entry {
        id: "6",
        name: "Balanceador Manaus",
        host: "lb-ma-01",
        device_type: DeviceType::LoadBalancer,
        status: DeviceStatus::Online,
        state: "AM",
        city: "Manaus",
        ip: "192.168.6.50",
        lat: -3.1190,
        lon: -60.0217,
        group: "Load balancers",
        description: "Balanceador da filial",
    },
];

/// The example fleet, stamped with `checked_at`.
#[must_use]
pub fn example_fleet(checked_at: DateTime<Utc>) -> Vec<Device> {
    FLEET
        .iter()
        .map(|e| Device {
            id: e.id.to_string(),
            name: e.name.to_string(),
            original_name: e.host.to_string(),
            device_type: e.device_type,
            status: e.status,
            state: e.state.to_string(),
            location: format!("{}, {}", e.city, e.state),
            ip: e.ip.to_string(),
            lat: e.lat,
            lon: e.lon,
            has_exact_coordinates: false,
            last_checked_at: checked_at,
            groups: vec![e.group.to_string()],
            description: e.description.to_string(),
        })
        .collect()
}
