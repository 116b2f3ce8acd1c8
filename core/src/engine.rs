//! Headless grid engine.
//!
//! Steps the metrics simulator without a timer so a driver (the runner,
//! a test) decides when ticks happen. Same seed, same sequence of
//! snapshots; the wall-clock stamp is the only input outside the seed.
//!
//! RULES:
//!   - All randomness flows through the RngBank.
//!   - Every state change is recorded in the event log.
//!   - Nothing is persisted; the log lives as long as the engine.

use crate::{
    clock::TickClock,
    config::GridConfig,
    event::{EventLogEntry, GridEvent},
    error::GridResult,
    fixtures::{FixtureStore, ZoneRecord},
    landing::LandingSeries,
    metrics::{self, LiveMetricsSnapshot},
    rng::{RngBank, StreamRng, StreamSlot},
    types::{RunId, Tick},
    zones::ZoneInsightsView,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct GridEngine {
    pub run_id:   RunId,
    pub clock:    TickClock,
    pub rng_bank: RngBank,
    metrics_rng:  StreamRng,
    landing_rng:  StreamRng,
    snapshot:     LiveMetricsSnapshot,
    zones:        ZoneInsightsView,
    fixtures:     Arc<FixtureStore>,
    log:          Vec<EventLogEntry>,
}

impl GridEngine {
    pub fn new(run_id: RunId, config: &GridConfig, fixtures: Arc<FixtureStore>) -> Self {
        let rng_bank = RngBank::new(config.seed);
        let mut engine = Self {
            clock:       TickClock::new(run_id.clone()),
            metrics_rng: rng_bank.for_stream(StreamSlot::Metrics),
            landing_rng: rng_bank.for_stream(StreamSlot::Landing),
            rng_bank,
            snapshot:    LiveMetricsSnapshot::seeded(&config.metrics_seed, Utc::now()),
            zones:       ZoneInsightsView::mount(Arc::clone(&fixtures)),
            fixtures,
            log:         Vec::new(),
            run_id,
        };
        let init = GridEvent::RunInitialized {
            run_id: engine.run_id.clone(),
            seed:   config.seed,
        };
        engine.record(0, "engine", init);
        engine
    }

    /// Engine over the built-in zones with the test configuration.
    pub fn build_test(run_id: RunId, seed: u64) -> Self {
        let config = GridConfig { seed, ..GridConfig::default_test() };
        Self::new(run_id, &config, Arc::new(FixtureStore::builtin()))
    }

    /// Advance one tick, stamping the snapshot with the current wall clock.
    /// The clock must be running; drivers go through `run_ticks`.
    pub fn tick(&mut self) -> GridResult<Vec<GridEvent>> {
        self.tick_at(Utc::now())
    }

    /// Advance one tick with an explicit "last updated" stamp.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> GridResult<Vec<GridEvent>> {
        let tick = self.clock.advance();
        let started = GridEvent::TickStarted { tick };

        self.snapshot = metrics::tick(&self.snapshot, &mut self.metrics_rng, now);
        let s = &self.snapshot;
        let updated = GridEvent::MetricsUpdated {
            tick,
            energy_demand:     s.energy_demand,
            water_flow:        s.water_flow,
            anomalies:         s.anomalies,
            renewable_percent: s.renewable_percent,
            peak_load:         s.peak_load,
            water_tank_level:  s.water_tank_level,
        };
        log::debug!(
            "tick={tick} energy={} flow={} anomalies={}",
            s.energy_demand,
            s.water_flow,
            s.anomalies
        );

        let completed = GridEvent::TickCompleted { tick };
        let events = vec![started, updated, completed];
        for event in &events {
            self.record(tick, "metrics", event.clone());
        }
        Ok(events)
    }

    /// Resume, run `n` ticks, pause again.
    pub fn run_ticks(&mut self, n: u64) -> GridResult<()> {
        self.clock.resume();
        let result = (0..n).try_for_each(|_| self.tick().map(|_| ()));
        self.clock.pause();
        result
    }

    /// Run one driver step at the clock's current speed.
    pub fn step(&mut self) -> GridResult<()> {
        let n = self.clock.ticks_per_step();
        self.run_ticks(n)
    }

    pub fn select_zone(&mut self, zone_id: &str) -> GridResult<ZoneRecord> {
        let zone = self.zones.select_by_id(zone_id)?.clone();
        let tick = self.clock.current_tick;
        self.record(tick, "zones", GridEvent::ZoneSelected { tick, zone_id: zone.id.clone() });
        Ok(zone)
    }

    /// Landing page charts ending at `now`. Draws from its own stream, so
    /// the metrics sequence is unaffected.
    pub fn landing_series(&mut self, now: DateTime<Utc>) -> LandingSeries {
        LandingSeries::generate(&mut self.landing_rng, now)
    }

    pub fn snapshot(&self) -> &LiveMetricsSnapshot {
        &self.snapshot
    }

    pub fn zones(&self) -> &ZoneInsightsView {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut ZoneInsightsView {
        &mut self.zones
    }

    pub fn fixtures(&self) -> &FixtureStore {
        &self.fixtures
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.log
    }

    pub fn events_for_tick(&self, tick: Tick) -> impl Iterator<Item = &EventLogEntry> {
        self.log.iter().filter(move |e| e.tick == tick)
    }

    fn record(&mut self, tick: Tick, source: &str, event: GridEvent) {
        let entry = EventLogEntry {
            seq:    self.log.len() as u64,
            run_id: self.run_id.clone(),
            tick,
            source: source.to_string(),
            event,
        };
        self.log.push(entry);
    }
}
