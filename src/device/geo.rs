//! Coordinate resolution for devices.
//!
//! Every device must land on the map, so [`resolve`] walks a fixed
//! ladder and stops at the first tier that yields a usable pair:
//!
//! 1. explicit inventory `location_lat` / `location_lon`,
//! 2. a coordinate pair found in free text (inventory notes, or the host
//!    description when there are no notes),
//! 3. the capital of the host's region code,
//! 4. [`DEFAULT_POINT`] (São Paulo).
//!
//! Only tier 1 counts as exact.

use std::sync::LazyLock;

use regex::Regex;

use crate::zabbix::model::Inventory;

/// Region assumed when the location string carries no trailing code.
pub const DEFAULT_STATE: &str = "SP";

pub const DEFAULT_POINT: Coordinates = Coordinates {
    lat: -23.5505,
    lon: -46.6333,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    Inventory,
    FreeText,
    RegionTable,
    Default,
}

impl CoordinateSource {
    #[must_use]
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Inventory)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
    pub capital: Coordinates,
}

const fn region(code: &'static str, name: &'static str, lat: f64, lon: f64) -> Region {
    Region {
        code,
        name,
        capital: Coordinates { lat, lon },
    }
}

/// Brazilian federative units, located at their capitals.
pub const REGIONS: &[Region] = &[
    region("AC", "Acre", -9.9754, -67.8249),
    region("AL", "Alagoas", -9.6658, -35.7353),
    region("AM", "Amazonas", -3.1190, -60.0217),
    region("AP", "Amapá", 0.0349, -51.0694),
    region("BA", "Bahia", -12.9714, -38.5014),
    region("CE", "Ceará", -3.7172, -38.5433),
    region("DF", "Distrito Federal", -15.7801, -47.9292),
    region("ES", "Espírito Santo", -20.3155, -40.3128),
    region("GO", "Goiás", -16.6869, -49.2648),
    region("MA", "Maranhão", -2.5307, -44.3068),
    region("MG", "Minas Gerais", -19.9167, -43.9345),
    region("MS", "Mato Grosso do Sul", -20.4697, -54.6201),
    region("MT", "Mato Grosso", -15.6014, -56.0979),
    region("PA", "Pará", -1.4558, -48.4902),
    region("PB", "Paraíba", -7.1195, -34.8450),
    region("PE", "Pernambuco", -8.0476, -34.8770),
    region("PI", "Piauí", -5.0919, -42.8034),
    region("PR", "Paraná", -25.4284, -49.2733),
    region("RJ", "Rio de Janeiro", -22.9068, -43.1729),
    region("RN", "Rio Grande do Norte", -5.7945, -35.2110),
    region("RO", "Rondônia", -8.7612, -63.9004),
    region("RR", "Roraima", 2.8235, -60.6758),
    region("RS", "Rio Grande do Sul", -30.0346, -51.2177),
    region("SC", "Santa Catarina", -27.5954, -48.5480),
    region("SE", "Sergipe", -10.9472, -37.0731),
    region("SP", "São Paulo", -23.5505, -46.6333),
    region("TO", "Tocantins", -10.1840, -48.3336),
];

static STATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s?([A-Z]{2})$").expect("state suffix pattern"));

// Both halves need a fractional part; a bare "2 4" in a description is
// far more likely a port count than a position.
static COORDINATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d.])([-+]?\d{1,3}\.\d+)(?:\s*,\s*|\s+)([-+]?\d{1,3}\.\d+)(?:$|[^\d.])")
        .expect("coordinate pair pattern")
});

#[must_use]
pub fn lookup_region(code: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.code == code)
}

/// Trailing `, XX` region code of a location string.
#[must_use]
pub fn region_code(location: &str) -> Option<&str> {
    STATE_SUFFIX
        .captures(location.trim_end())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Parse one coordinate component; anything non-finite is "not found".
#[must_use]
pub fn parse_component(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok().or_else(|| {
        // Decimal comma, as typed into Brazilian inventories
        if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
            trimmed.replace(',', ".").parse::<f64>().ok()
        } else {
            None
        }
    })?;
    parsed.is_finite().then_some(parsed)
}

/// First plausible `lat, lon` pair embedded in free text.
#[must_use]
pub fn find_coordinates(text: &str) -> Option<Coordinates> {
    COORDINATE_PAIR.captures_iter(text).find_map(|caps| {
        let lat = parse_component(caps.get(1)?.as_str())?;
        let lon = parse_component(caps.get(2)?.as_str())?;
        ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon))
            .then_some(Coordinates { lat, lon })
    })
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Resolve the coordinates of a host, never failing.
#[must_use]
pub fn resolve(
    inventory: &Inventory,
    description: &str,
    state: &str,
) -> (Coordinates, CoordinateSource) {
    let exact = inventory
        .location_lat
        .as_deref()
        .and_then(parse_component)
        .zip(inventory.location_lon.as_deref().and_then(parse_component));
    if let Some((lat, lon)) = exact {
        return (Coordinates { lat, lon }, CoordinateSource::Inventory);
    }

    let text = non_empty(inventory.notes.as_ref()).unwrap_or(description);
    if let Some(found) = find_coordinates(text) {
        return (found, CoordinateSource::FreeText);
    }

    if let Some(region) = lookup_region(state) {
        return (region.capital, CoordinateSource::RegionTable);
    }

    (DEFAULT_POINT, CoordinateSource::Default)
}
