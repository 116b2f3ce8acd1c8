//! Fixture loading from the shipped data directory.

use ecogrid_core::{
    config::GridConfig,
    error::GridError,
    fixtures::{FixtureStore, ZoneStatus},
};

fn data_dir() -> String {
    format!("{}/../data", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn shipped_fixtures_load() {
    let store = FixtureStore::load(&data_dir()).expect("load fixtures");
    assert_eq!(store.zones().len(), 5);
    assert!(!store.energy_series().is_empty());
    assert!(!store.water_series().is_empty());

    let cp = store.zone("1").unwrap();
    assert_eq!(cp.status, ZoneStatus::Critical);
    assert_eq!(cp.temperature, Some(36.0));
    assert_eq!(store.attention_zones().count(), 4);
}

#[test]
fn shipped_config_matches_the_defaults_it_documents() {
    let cfg = GridConfig::load(&data_dir()).expect("load config");
    assert_eq!(cfg.tick_period_ms, 3000);
    assert_eq!(cfg.metrics_seed.energy_demand, 6800);
    assert_eq!(cfg.metrics_seed.water_flow, 1250);
}

#[test]
fn missing_directory_is_an_io_error_naming_the_file() {
    let err = FixtureStore::load("/no/such/dir").unwrap_err();
    match err {
        GridError::FixtureIo { path, .. } => assert!(path.ends_with("zones.json")),
        other => panic!("unexpected error: {other}"),
    }
}
