//! `ECOGRID_API_KEY` handling. Kept in its own test binary with a single
//! test: it mutates the process environment.

use ecogrid_core::config::{GridConfig, API_KEY_ENV, DEFAULT_API_KEY};

fn data_dir() -> String {
    format!("{}/../data", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn env_key_overrides_file_key_unless_empty() {
    std::env::remove_var(API_KEY_ENV);
    let from_file = GridConfig::load(&data_dir()).expect("load config");
    assert_eq!(from_file.api_key, DEFAULT_API_KEY);
    assert_eq!(from_file.seed, 42);

    std::env::set_var(API_KEY_ENV, "rotated-key");
    let overridden = GridConfig::load(&data_dir()).expect("load config");
    assert_eq!(overridden.api_key, "rotated-key");
    assert_eq!(overridden.tick_period_ms, from_file.tick_period_ms);

    let defaults = GridConfig::load("/definitely/not/a/dir").expect("defaults");
    assert_eq!(defaults.api_key, "rotated-key", "override applies without a config file too");

    std::env::set_var(API_KEY_ENV, "");
    let blank = GridConfig::load(&data_dir()).expect("load config");
    assert_eq!(blank.api_key, DEFAULT_API_KEY, "an empty variable is ignored");

    std::env::remove_var(API_KEY_ENV);
}
