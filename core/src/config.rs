use crate::{
    error::{GridError, GridResult},
    metrics::MetricsSeed,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_KEY_ENV: &str = "ECOGRID_API_KEY";
pub const DEFAULT_API_KEY: &str = "dev-key";
pub const DEFAULT_TICK_PERIOD_MS: u64 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub seed:           u64,
    pub tick_period_ms: u64,
    pub data_dir:       String,
    pub api_key:        String,
    pub metrics_seed:   MetricsSeed,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            seed:           42,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            data_dir:       "./data".to_string(),
            api_key:        DEFAULT_API_KEY.to_string(),
            metrics_seed:   MetricsSeed::default(),
        }
    }
}

impl GridConfig {
    /// Read `{data_dir}/grid_config.json` when it exists, defaults otherwise.
    /// `ECOGRID_API_KEY` overrides whatever key the file carries.
    pub fn load(data_dir: &str) -> GridResult<Self> {
        let path = format!("{data_dir}/grid_config.json");
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<GridConfig>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {path}; using default grid config");
                GridConfig::default()
            }
            Err(source) => return Err(GridError::FixtureIo { path, source }),
        };
        config.data_dir = data_dir.to_string();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api_key = key;
            }
        }
        Ok(config)
    }

    /// Deterministic configuration for tests: fixed seed, short period.
    pub fn default_test() -> Self {
        Self {
            seed:           0xEC06_21D0,
            tick_period_ms: 100,
            api_key:        "test-key".to_string(),
            ..Self::default()
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{ "tick_period_ms": 4000 }"#).unwrap();
        assert_eq!(cfg.tick_period(), Duration::from_millis(4000));
        assert_eq!(cfg.metrics_seed.energy_demand, 6800);
        assert_eq!(cfg.api_key, DEFAULT_API_KEY);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = GridConfig::load("/definitely/not/a/dir").unwrap();
        assert_eq!(cfg.tick_period_ms, DEFAULT_TICK_PERIOD_MS);
        assert_eq!(cfg.data_dir, "/definitely/not/a/dir");
    }
}
