//! Events recorded by the headless engine, one log per run.

use crate::types::{RunId, Tick, ZoneId};
use serde::{Deserialize, Serialize};

/// Variants are appended over time, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEvent {
    RunInitialized {
        run_id: RunId,
        seed:   u64,
    },
    TickStarted {
        tick: Tick,
    },
    MetricsUpdated {
        tick:              Tick,
        energy_demand:     i64,
        water_flow:        i64,
        anomalies:         u32,
        renewable_percent: f64,
        peak_load:         i64,
        water_tank_level:  f64,
    },
    TickCompleted {
        tick: Tick,
    },
    ZoneSelected {
        tick:    Tick,
        zone_id: ZoneId,
    },
}

impl GridEvent {
    /// Stable name of the variant, used in summaries and log lines.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. } => "run_initialized",
            Self::TickStarted { .. }    => "tick_started",
            Self::MetricsUpdated { .. } => "metrics_updated",
            Self::TickCompleted { .. }  => "tick_completed",
            Self::ZoneSelected { .. }   => "zone_selected",
        }
    }
}

/// One entry of the in-memory event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLogEntry {
    pub seq:     u64,
    pub run_id:  RunId,
    pub tick:    Tick,
    pub source:  String,
    pub event:   GridEvent,
}
