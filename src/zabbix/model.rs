//! Wire types for the Zabbix JSON-RPC API.
//!
//! [`RawHost`] mirrors one entry of a `host.get` result. Zabbix is loose
//! about encodings across versions, so decoding is lenient: numeric
//! flags arrive as strings or integers, `inventory` is an object or an
//! empty array when inventory is disabled, and host groups come back
//! under `hostgroups` (6.2+) or `groups` (older releases).

use serde::{Deserialize, Deserializer, Serialize};

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<&'a str>,
}

/// JSON-RPC 2.0 response envelope; exactly one of `result` / `error` is set.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<R> {
    pub result: Option<R>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostStatus {
    #[default]
    Active,
    Disabled,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHost {
    #[serde(rename = "hostid", alias = "hostId", default, deserialize_with = "lenient::string")]
    pub host_id: String,

    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::status")]
    pub status: HostStatus,

    /// Availability digit as sent by Zabbix, when present.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub available: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub interfaces: Vec<HostInterface>,

    #[serde(default, deserialize_with = "lenient::inventory")]
    pub inventory: Inventory,

    #[serde(default, alias = "hostgroups")]
    pub groups: Vec<HostGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostInterface {
    #[serde(default)]
    pub ip: String,

    #[serde(default)]
    pub dns: String,

    #[serde(rename = "main", alias = "isMain", default, deserialize_with = "lenient::flag")]
    pub is_main: bool,

    /// Per-interface availability (Zabbix 5.4+): 0 unknown, 1 up, 2 down.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub available: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "locationLat")]
    pub location_lat: Option<String>,
    #[serde(default, alias = "locationLon")]
    pub location_lon: Option<String>,
    #[serde(default, alias = "siteAddressA")]
    pub site_address_a: Option<String>,
    #[serde(default, alias = "siteAddressB")]
    pub site_address_b: Option<String>,
    #[serde(default, alias = "siteAddressC")]
    pub site_address_c: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostGroup {
    #[serde(rename = "groupid", alias = "groupId", default, deserialize_with = "lenient::string")]
    pub group_id: String,

    #[serde(default)]
    pub name: String,
}

impl RawHost {
    /// Fill a missing host-level `available` from the main interface.
    ///
    /// Zabbix 5.4 moved availability onto interfaces; a down interface
    /// is folded into the host-level "explicitly unavailable" marker `0`.
    #[must_use]
    pub fn with_interface_availability(mut self) -> Self {
        if self.available.is_none() {
            let main = self
                .interfaces
                .iter()
                .find(|i| i.is_main)
                .or_else(|| self.interfaces.first());
            self.available = match main.and_then(|i| i.available.as_deref()).map(str::trim) {
                Some("2") => Some("0".to_string()),
                Some("1") => Some("1".to_string()),
                _ => None,
            };
        }
        self
    }
}

mod lenient {
    use super::{Deserialize, Deserializer, HostStatus, Inventory};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Bool(bool),
        Float(f64),
    }

    impl Scalar {
        fn into_string(self) -> String {
            match self {
                Self::Str(s) => s,
                Self::Int(i) => i.to_string(),
                Self::Bool(b) => u8::from(b).to_string(),
                Self::Float(f) => f.to_string(),
            }
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<Scalar>::deserialize(d)?
            .map(Scalar::into_string)
            .unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Scalar>::deserialize(d)?.map(Scalar::into_string))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(string(d)?.trim() == "1")
    }

    pub fn status<'de, D: Deserializer<'de>>(d: D) -> Result<HostStatus, D::Error> {
        Ok(if string(d)?.trim() == "1" {
            HostStatus::Disabled
        } else {
            HostStatus::Active
        })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum InventoryShape {
        Fields(Inventory),
        // Zabbix sends `[]` for hosts with inventory disabled
        Empty(Vec<serde_json::Value>),
    }

    pub fn inventory<'de, D: Deserializer<'de>>(d: D) -> Result<Inventory, D::Error> {
        Ok(match Option::<InventoryShape>::deserialize(d)? {
            Some(InventoryShape::Fields(inv)) => inv,
            Some(InventoryShape::Empty(_)) | None => Inventory::default(),
        })
    }
}
