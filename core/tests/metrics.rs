//! Metrics simulator tests: bounded deltas, clamping, memoryless anomaly
//! counts, and the input snapshot staying untouched.

mod common;

use chrono::{TimeZone, Utc};
use common::Pinned;
use ecogrid_core::{
    metrics::{self, LiveMetricsSnapshot, MetricsSeed},
    rng::{RngBank, StreamSlot},
};

fn seeded() -> LiveMetricsSnapshot {
    let at = Utc.with_ymd_and_hms(2025, 10, 15, 11, 0, 0).unwrap();
    LiveMetricsSnapshot::seeded(&MetricsSeed::default(), at)
}

/// Seed {6800, 1250} with every draw at its upper bound gives exactly
/// {6900, 1275}.
#[test]
fn max_draws_move_energy_and_flow_by_their_bounds() {
    let mut rng = Pinned::max();
    let next = metrics::tick(&seeded(), &mut rng, Utc::now());

    assert_eq!(next.energy_demand, 6900);
    assert_eq!(next.water_flow, 1275);
    assert_eq!(next.anomalies, 2);
    assert_eq!(next.renewable_percent, 36.0);
    assert_eq!(next.water_tank_level, 77.0);
    assert_eq!(next.peak_load, 6900);
    assert_eq!(next.tick, 1);
}

#[test]
fn draws_are_requested_in_a_fixed_order_with_the_documented_bounds() {
    let mut rng = Pinned::min();
    let next = metrics::tick(&seeded(), &mut rng, Utc::now());

    assert_eq!(
        rng.requests,
        vec![(-100, 100), (-25, 25), (0, 2), (-1, 1), (-2, 2)]
    );
    assert_eq!(next.energy_demand, 6700);
    assert_eq!(next.water_flow, 1225);
    assert_eq!(next.anomalies, 0);
    // Peak never drops below what was already seen.
    assert_eq!(next.peak_load, 6800);
}

#[test]
fn tick_leaves_its_input_untouched() {
    let before = seeded();
    let copy = before.clone();
    let mut rng = RngBank::new(11).for_stream(StreamSlot::Metrics);

    let a = metrics::tick(&before, &mut rng, Utc::now());
    let b = metrics::tick(&before, &mut rng, Utc::now());

    assert_eq!(before, copy, "tick mutated its input");
    assert_eq!(a.tick, 1);
    assert_eq!(b.tick, 1);
}

#[test]
fn renewable_and_tank_level_stay_clamped_at_both_ends() {
    let mut low = seeded();
    low.renewable_percent = 10.0;
    low.water_tank_level = 30.0;
    for _ in 0..50 {
        low = metrics::tick(&low, &mut Pinned::min(), Utc::now());
    }
    assert_eq!(low.renewable_percent, 10.0);
    assert_eq!(low.water_tank_level, 30.0);

    let mut high = seeded();
    for _ in 0..200 {
        high = metrics::tick(&high, &mut Pinned::max(), Utc::now());
    }
    assert_eq!(high.renewable_percent, 100.0);
    assert_eq!(high.water_tank_level, 100.0);
}

#[test]
fn clamping_holds_for_any_seeded_run() {
    for seed in [1u64, 7, 42, 0xDEAD_BEEF, u64::MAX] {
        let mut rng = RngBank::new(seed).for_stream(StreamSlot::Metrics);
        let mut snap = seeded();
        for _ in 0..2_000 {
            let prev = snap.clone();
            snap = metrics::tick(&prev, &mut rng, Utc::now());

            assert!((10.0..=100.0).contains(&snap.renewable_percent));
            assert!((30.0..=100.0).contains(&snap.water_tank_level));
            assert!(snap.anomalies <= 2);
            assert!((snap.energy_demand - prev.energy_demand).abs() <= 100);
            assert!((snap.water_flow - prev.water_flow).abs() <= 25);
            assert!(snap.peak_load >= snap.energy_demand);
        }
    }
}

#[test]
fn last_updated_comes_from_the_supplied_clock() {
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let next = metrics::tick(&seeded(), &mut Pinned::max(), at);
    assert_eq!(next.last_updated, at);
}
