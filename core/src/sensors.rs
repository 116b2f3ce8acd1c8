//! Sensor metadata registry behind an API-key check.
//!
//! Sensors live in memory for the lifetime of the registry. Listing is in
//! id order.

use crate::{
    error::{GridError, GridResult},
    types::SensorId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id:       SensorId,
    pub zone_id:  i64,
    /// Sensor kind, e.g. "pressure" or "flow".
    #[serde(rename = "type")]
    pub kind:     String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Partial update: only the fields that are `Some` change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SensorUpdate {
    #[serde(default)]
    pub zone_id:  Option<i64>,
    #[serde(default, rename = "type")]
    pub kind:     Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyGuard {
    expected: String,
}

impl ApiKeyGuard {
    pub fn new(expected: impl Into<String>) -> Self {
        Self { expected: expected.into() }
    }

    pub fn check(&self, presented: Option<&str>) -> GridResult<()> {
        match presented {
            Some(key) if !key.is_empty() && key == self.expected => Ok(()),
            _ => Err(GridError::Unauthorized),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
}

pub fn health() -> Health {
    Health { status: "ok" }
}

pub struct SensorRegistry {
    guard:   ApiKeyGuard,
    sensors: BTreeMap<SensorId, Sensor>,
}

impl SensorRegistry {
    pub fn new(guard: ApiKeyGuard) -> Self {
        Self { guard, sensors: BTreeMap::new() }
    }

    pub fn list(&self, api_key: Option<&str>) -> GridResult<Vec<Sensor>> {
        self.guard.check(api_key)?;
        Ok(self.sensors.values().cloned().collect())
    }

    pub fn create(&mut self, api_key: Option<&str>, sensor: Sensor) -> GridResult<Sensor> {
        self.guard.check(api_key)?;
        if self.sensors.contains_key(&sensor.id) {
            return Err(GridError::SensorExists { id: sensor.id });
        }
        log::info!("Sensor registered: {} ({}) in zone {}", sensor.id, sensor.kind, sensor.zone_id);
        self.sensors.insert(sensor.id.clone(), sensor.clone());
        Ok(sensor)
    }

    pub fn get(&self, api_key: Option<&str>, id: &str) -> GridResult<Sensor> {
        self.guard.check(api_key)?;
        self.sensors
            .get(id)
            .cloned()
            .ok_or_else(|| GridError::SensorNotFound { id: id.to_string() })
    }

    pub fn update(&mut self, api_key: Option<&str>, id: &str, update: SensorUpdate) -> GridResult<Sensor> {
        self.guard.check(api_key)?;
        let sensor = self
            .sensors
            .get_mut(id)
            .ok_or_else(|| GridError::SensorNotFound { id: id.to_string() })?;
        if let Some(zone_id) = update.zone_id {
            sensor.zone_id = zone_id;
        }
        if let Some(kind) = update.kind {
            sensor.kind = kind;
        }
        if let Some(location) = update.location {
            sensor.location = Some(location);
        }
        Ok(sensor.clone())
    }

    pub fn delete(&mut self, api_key: Option<&str>, id: &str) -> GridResult<()> {
        self.guard.check(api_key)?;
        self.sensors
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GridError::SensorNotFound { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
