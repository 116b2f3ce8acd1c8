//! Zone fixture store: the static zone list and the energy and water time
//! series the dashboard charts. Loaded once, never mutated afterwards.

use crate::{
    error::{GridError, GridResult},
    types::ZoneId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Zone classification. Anything the fixtures carry beyond the three known
/// values deserializes to `Unknown` instead of failing the load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    Normal,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

impl ZoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal   => "normal",
            Self::Warning  => "warning",
            Self::Critical => "critical",
            Self::Unknown  => "unknown",
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Warning | Self::Critical)
    }
}

/// One zone as authored in the fixture file.
///
/// `status` and `alert` are independent fields: nothing ties a critical
/// status to the presence of alert text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub id:                ZoneId,
    pub name:              String,
    #[serde(flatten)]
    pub position:          GeoPoint,
    pub status:            ZoneStatus,
    pub energy_demand:     f64,
    pub water_pressure:    f64,
    pub water_flow:        f64,
    #[serde(default)]
    pub renewable_percent: Option<f64>,
    #[serde(default)]
    pub power:             Option<String>,
    #[serde(default)]
    pub temperature:       Option<f64>,
    #[serde(default)]
    pub air_quality:       Option<String>,
    #[serde(default)]
    pub alert:             Option<String>,
    pub last_updated:      String,
}

impl ZoneRecord {
    /// Alert text when it is present and non-empty.
    pub fn alert_text(&self) -> Option<&str> {
        self.alert.as_deref().filter(|a| !a.is_empty())
    }
}

/// One hourly point of the energy chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnergyPoint {
    pub timestamp:         String,
    pub demand:            f64,
    pub supply:            f64,
    pub prediction:        f64,
    #[serde(default)]
    pub peak_load:         Option<f64>,
    #[serde(default)]
    pub renewable_percent: Option<f64>,
}

/// One point of the water distribution chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterPoint {
    pub timestamp: String,
    pub flow:      f64,
    pub pressure:  f64,
    pub quality:   f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureStore {
    zones:  Vec<ZoneRecord>,
    energy: Vec<EnergyPoint>,
    water:  Vec<WaterPoint>,
}

impl FixtureStore {
    pub fn new(zones: Vec<ZoneRecord>, energy: Vec<EnergyPoint>, water: Vec<WaterPoint>) -> Self {
        Self { zones, energy, water }
    }

    /// Load `zones.json`, `energy.json` and `water.json` from `data_dir`.
    pub fn load(data_dir: &str) -> GridResult<Self> {
        let zones = read_json(&format!("{data_dir}/zones.json"))?;
        let energy = read_json(&format!("{data_dir}/energy.json"))?;
        let water = read_json(&format!("{data_dir}/water.json"))?;
        let store = Self { zones, energy, water };
        log::info!(
            "Loaded fixtures from {data_dir}: {} zones, {} energy points, {} water points",
            store.zones.len(),
            store.energy.len(),
            store.water.len()
        );
        Ok(store)
    }

    /// The five Delhi zones the zone-insights map ships with.
    pub fn builtin() -> Self {
        let zone = |id: &str, name: &str, lat: f64, lng: f64, status: ZoneStatus, alert: &str,
                    energy: f64, pressure: f64, flow: f64, renewable: f64, updated: &str| ZoneRecord {
            id: id.to_string(),
            name: name.to_string(),
            position: GeoPoint { lat, lng },
            status,
            energy_demand: energy,
            water_pressure: pressure,
            water_flow: flow,
            renewable_percent: Some(renewable),
            power: None,
            temperature: None,
            air_quality: None,
            alert: Some(alert.to_string()),
            last_updated: updated.to_string(),
        };
        let zones = vec![
            zone("1", "Connaught Place", 28.6328, 77.2197, ZoneStatus::Critical,
                 "High power load and low water pressure", 450.0, 25.0, 120.0, 40.0, "2025-10-15T11:00:00"),
            zone("2", "Karol Bagh", 28.6515, 77.1945, ZoneStatus::Warning,
                 "Moderate power load", 300.0, 35.0, 180.0, 30.0, "2025-10-15T11:05:00"),
            zone("3", "Hauz Khas", 28.5495, 77.1980, ZoneStatus::Normal,
                 "", 150.0, 40.0, 200.0, 50.0, "2025-10-15T10:55:00"),
            zone("4", "Lajpat Nagar", 28.5672, 77.2431, ZoneStatus::Warning,
                 "Water flow slightly below average", 280.0, 32.0, 160.0, 35.0, "2025-10-15T10:50:00"),
            zone("5", "Dwarka", 28.5911, 77.0531, ZoneStatus::Critical,
                 "Power outage in sector 10", 500.0, 28.0, 140.0, 25.0, "2025-10-15T11:10:00"),
        ];
        Self { zones, energy: Vec::new(), water: Vec::new() }
    }

    pub fn zones(&self) -> &[ZoneRecord] {
        &self.zones
    }

    pub fn energy_series(&self) -> &[EnergyPoint] {
        &self.energy
    }

    pub fn water_series(&self) -> &[WaterPoint] {
        &self.water
    }

    pub fn zone(&self, id: &str) -> GridResult<&ZoneRecord> {
        self.zones
            .iter()
            .find(|z| z.id == id)
            .ok_or_else(|| GridError::ZoneNotFound { id: id.to_string() })
    }

    /// Zones whose status is warning or critical, in fixture order.
    pub fn attention_zones(&self) -> impl Iterator<Item = &ZoneRecord> {
        self.zones.iter().filter(|z| z.status.needs_attention())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> GridResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| GridError::FixtureIo {
        path: path.to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
