//! Shared primitive types used across the whole crate.

/// One discrete metrics update. Tick 0 is the seed snapshot.
pub type Tick = u64;

/// Stable identifier of a zone in the fixture store.
pub type ZoneId = String;

/// Stable identifier of a registered sensor.
pub type SensorId = String;

/// The canonical run identifier for a headless engine run.
pub type RunId = String;
