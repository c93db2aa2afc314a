//! Aggregate counters over a device list.
//!
//! [`DeviceStats`] backs `GET /api/stats` and the `meta.stats` block of
//! the device listing; [`summarize_states`] backs `GET /api/states`.
//! Ordered maps keep the JSON output stable between calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geo::lookup_region;
use super::{Device, DeviceStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStats {
    pub total: usize,
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_state: BTreeMap<String, usize>,
}

impl DeviceStats {
    #[must_use]
    pub fn from_devices(devices: &[Device]) -> Self {
        let mut stats = Self {
            total: devices.len(),
            ..Self::default()
        };
        for device in devices {
            match device.status {
                DeviceStatus::Online => stats.online += 1,
                DeviceStatus::Warning => stats.warning += 1,
                DeviceStatus::Offline => stats.offline += 1,
            }
            *stats
                .by_type
                .entry(device.device_type.as_str().to_string())
                .or_default() += 1;
            *stats.by_state.entry(device.state.clone()).or_default() += 1;
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StateSummary {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub devices: usize,
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
}

/// One entry per region code present in `devices`, sorted by code.
///
/// Known codes are placed at their capital; unknown ones reuse the
/// position of their first device.
#[must_use]
pub fn summarize_states(devices: &[Device]) -> Vec<StateSummary> {
    let mut by_code: BTreeMap<&str, StateSummary> = BTreeMap::new();
    for device in devices {
        let entry = by_code.entry(device.state.as_str()).or_insert_with(|| {
            let (name, point) = lookup_region(&device.state).map_or_else(
                || (device.state.clone(), (device.lat, device.lon)),
                |r| (r.name.to_string(), (r.capital.lat, r.capital.lon)),
            );
            StateSummary {
                code: device.state.clone(),
                name,
                lat: point.0,
                lon: point.1,
                devices: 0,
                online: 0,
                warning: 0,
                offline: 0,
            }
        });
        entry.devices += 1;
        match device.status {
            DeviceStatus::Online => entry.online += 1,
            DeviceStatus::Warning => entry.warning += 1,
            DeviceStatus::Offline => entry.offline += 1,
        }
    }
    by_code.into_values().collect()
}
