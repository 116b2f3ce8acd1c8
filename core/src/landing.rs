//! Hourly sparkline series for the landing page.

use crate::rng::RandomSource;
use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;

pub const SERIES_HOURS: usize = 24;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeriesPoint {
    pub time:  String,
    pub value: i64,
}

fn hourly<R, F>(rng: &mut R, now: DateTime<Utc>, mut value: F) -> Vec<SeriesPoint>
where
    R: RandomSource + ?Sized,
    F: FnMut(f64, &mut R) -> f64,
{
    (0..SERIES_HOURS)
        .map(|i| {
            let at = now - Duration::hours((SERIES_HOURS - 1 - i) as i64);
            SeriesPoint {
                time:  format!("{}:00", at.hour()),
                value: value(i as f64, &mut *rng).round() as i64,
            }
        })
        .collect()
}

/// City energy demand (MW) over the last 24 hours.
pub fn energy_series<R: RandomSource + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<SeriesPoint> {
    hourly(rng, now, |i, rng| 4200.0 + (i / 3.0).sin() * 220.0 + (rng.next_f64() * 80.0 - 40.0))
}

/// Air quality index over the last 24 hours.
pub fn aqi_series<R: RandomSource + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<SeriesPoint> {
    hourly(rng, now, |i, rng| 80.0 + (i / 4.0).cos() * 10.0 + (rng.next_f64() * 8.0 - 4.0))
}

/// Both landing charts, drawn energy first.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LandingSeries {
    pub energy: Vec<SeriesPoint>,
    pub aqi:    Vec<SeriesPoint>,
}

impl LandingSeries {
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Self {
        let energy = energy_series(rng, now);
        let aqi = aqi_series(rng, now);
        Self { energy, aqi }
    }
}
