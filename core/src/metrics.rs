//! Live metrics simulator.
//!
//! A snapshot is replaced wholesale on every tick. `tick` is a pure function
//! of the previous snapshot, the random source and the wall-clock stamp; it
//! never touches its input.

use crate::{rng::RandomSource, types::Tick};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ENERGY_DELTA: i64 = 100;
pub const WATER_FLOW_DELTA: i64 = 25;
pub const MAX_ANOMALIES: i64 = 2;
pub const RENEWABLE_DELTA: i64 = 1;
pub const TANK_LEVEL_DELTA: i64 = 2;

pub const RENEWABLE_RANGE: (f64, f64) = (10.0, 100.0);
pub const TANK_LEVEL_RANGE: (f64, f64) = (30.0, 100.0);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveMetricsSnapshot {
    /// Ticks applied since the seed snapshot.
    pub tick:              Tick,
    pub energy_demand:     i64,
    pub water_flow:        i64,
    pub anomalies:         u32,
    pub renewable_percent: f64,
    /// Highest energy demand seen since mount.
    pub peak_load:         i64,
    pub water_tank_level:  f64,
    pub last_updated:      DateTime<Utc>,
}

/// Initial values a freshly mounted dashboard starts from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsSeed {
    pub energy_demand:     i64,
    pub water_flow:        i64,
    pub anomalies:         u32,
    pub renewable_percent: f64,
    pub peak_load:         i64,
    pub water_tank_level:  f64,
}

impl Default for MetricsSeed {
    fn default() -> Self {
        Self {
            energy_demand:     6800,
            water_flow:        1250,
            anomalies:         2,
            renewable_percent: 35.0,
            peak_load:         6800,
            water_tank_level:  75.0,
        }
    }
}

impl LiveMetricsSnapshot {
    pub fn seeded(seed: &MetricsSeed, now: DateTime<Utc>) -> Self {
        Self {
            tick:              0,
            energy_demand:     seed.energy_demand,
            water_flow:        seed.water_flow,
            anomalies:         seed.anomalies,
            renewable_percent: seed.renewable_percent.clamp(RENEWABLE_RANGE.0, RENEWABLE_RANGE.1),
            peak_load:         seed.peak_load.max(seed.energy_demand),
            water_tank_level:  seed.water_tank_level.clamp(TANK_LEVEL_RANGE.0, TANK_LEVEL_RANGE.1),
            last_updated:      now,
        }
    }
}

/// Produce the next snapshot from `previous`.
///
/// Draw order is fixed (energy, water flow, anomalies, renewable, tank level)
/// so a seeded source replays identically.
pub fn tick<R: RandomSource + ?Sized>(
    previous: &LiveMetricsSnapshot,
    rng: &mut R,
    now: DateTime<Utc>,
) -> LiveMetricsSnapshot {
    let energy_demand = previous.energy_demand + rng.uniform_int(-ENERGY_DELTA, ENERGY_DELTA);
    let water_flow = previous.water_flow + rng.uniform_int(-WATER_FLOW_DELTA, WATER_FLOW_DELTA);
    // Memoryless: not derived from the previous count.
    let anomalies = rng.uniform_int(0, MAX_ANOMALIES) as u32;
    let renewable_percent = (previous.renewable_percent
        + rng.uniform_int(-RENEWABLE_DELTA, RENEWABLE_DELTA) as f64)
        .clamp(RENEWABLE_RANGE.0, RENEWABLE_RANGE.1);
    let water_tank_level = (previous.water_tank_level
        + rng.uniform_int(-TANK_LEVEL_DELTA, TANK_LEVEL_DELTA) as f64)
        .clamp(TANK_LEVEL_RANGE.0, TANK_LEVEL_RANGE.1);

    LiveMetricsSnapshot {
        tick: previous.tick + 1,
        energy_demand,
        water_flow,
        anomalies,
        renewable_percent,
        peak_load: previous.peak_load.max(energy_demand),
        water_tank_level,
        last_updated: now,
    }
}

/// Format an integer with comma thousands separators ("6,800").
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(6800), "6,800");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-12_500), "-12,500");
    }

    #[test]
    fn seed_is_clamped_into_range() {
        let seed = MetricsSeed { renewable_percent: 4.0, water_tank_level: 120.0, ..Default::default() };
        let snap = LiveMetricsSnapshot::seeded(&seed, Utc::now());
        assert_eq!(snap.renewable_percent, 10.0);
        assert_eq!(snap.water_tank_level, 100.0);
        assert_eq!(snap.tick, 0);
    }
}
