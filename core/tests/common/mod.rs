//! Shared test helpers.
#![allow(dead_code)]

use ecogrid_core::{
    fixtures::{GeoPoint, ZoneRecord, ZoneStatus},
    rng::RandomSource,
};

/// Random source that always returns one end of the requested range.
pub struct Pinned {
    high: bool,
    /// Every `(lo, hi)` range requested, in draw order.
    pub requests: Vec<(i64, i64)>,
}

impl Pinned {
    pub fn max() -> Self {
        Self { high: true, requests: Vec::new() }
    }

    pub fn min() -> Self {
        Self { high: false, requests: Vec::new() }
    }
}

impl RandomSource for Pinned {
    fn uniform_int(&mut self, lo: i64, hi: i64) -> i64 {
        self.requests.push((lo, hi));
        if self.high { hi } else { lo }
    }

    fn next_f64(&mut self) -> f64 {
        if self.high { 0.999_999 } else { 0.0 }
    }
}

pub fn zone(id: &str, status: ZoneStatus, alert: Option<&str>) -> ZoneRecord {
    ZoneRecord {
        id: id.to_string(),
        name: format!("Zone {id}"),
        position: GeoPoint { lat: 28.6, lng: 77.2 },
        status,
        energy_demand: 450.0,
        water_pressure: 25.0,
        water_flow: 120.0,
        renewable_percent: Some(40.0),
        power: None,
        temperature: None,
        air_quality: None,
        alert: alert.map(str::to_string),
        last_updated: "2025-10-15T11:00:00".to_string(),
    }
}
